use super::TYPE_WIDTH;
use crate::client::Instruction;
use serde_json::Value;
use std::fmt::Write;

/// `AAAA: OPCODE          [operand]`, one line per instruction
pub fn render_bytecode(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    for instr in instructions {
        let _ = write!(
            out,
            "{:04}: {:<width$}",
            instr.address,
            instr.opcode,
            width = TYPE_WIDTH
        );
        // Presence of the key decides, not the value
        if let Some(operand) = &instr.operand {
            out.push(' ');
            out.push_str(&operand_text(operand));
        }
        out.push('\n');
    }
    out
}

/// Textual form of an operand value.
///
/// Strings print raw, integral floats drop their fraction, compound values
/// print as compact JSON.
pub fn operand_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn instr(address: u32, opcode: &str, operand: Option<Value>) -> Instruction {
        Instruction {
            address,
            opcode: opcode.to_string(),
            operand,
        }
    }

    #[test]
    fn test_listing() {
        let listing = render_bytecode(&[
            instr(0, "PUSH", Some(json!(42))),
            instr(1, "PRINT", None),
            instr(12, "JMP", Some(json!(0))),
            instr(9999, "HALT", None),
        ]);

        let expected = concat!(
            "0000: PUSH            42\n",
            "0001: PRINT          \n",
            "0012: JMP             0\n",
            "9999: HALT           \n",
        );
        assert_eq!(listing, expected);
    }

    #[test]
    fn test_falsy_operands_still_render() {
        let listing = render_bytecode(&[
            instr(0, "PUSH", Some(json!(0))),
            instr(1, "LOAD", Some(json!(""))),
            instr(2, "PUSH", Some(Value::Null)),
            instr(3, "PUSH", Some(json!(false))),
        ]);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "0000: PUSH            0");
        assert_eq!(lines[1], "0001: LOAD            ");
        assert_eq!(lines[2], "0002: PUSH            null");
        assert_eq!(lines[3], "0003: PUSH            false");
    }

    #[test]
    fn test_operand_text_forms() {
        assert_eq!(operand_text(&json!("x")), "x");
        assert_eq!(operand_text(&json!(3.0)), "3");
        assert_eq!(operand_text(&json!(2.5)), "2.5");
        assert_eq!(operand_text(&json!(-7)), "-7");
        assert_eq!(operand_text(&json!([1, 2])), "[1,2]");
    }
}
