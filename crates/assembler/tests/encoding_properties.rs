//! Property tests for instruction word layout and label resolution.

use proptest::prelude::*;
use uvm_assembler::{assemble, assemble_to_binary, encode, AssemblyErrorKind, Operand};

fn word_of(source: &str) -> u32 {
    let program = assemble(source).unwrap();
    u32::from_le_bytes(encode(&program[0]).unwrap())
}

#[derive(Debug, Clone)]
enum Line {
    Store,
    Bitrev,
    Const(u16),
    Load(u32),
    Label,
    Blank,
}

fn line_strategy() -> impl Strategy<Value = Line> {
    prop_oneof![
        Just(Line::Store),
        Just(Line::Bitrev),
        any::<u16>().prop_map(Line::Const),
        (0u32..=0x00FF_FFFF).prop_map(Line::Load),
        Just(Line::Label),
        Just(Line::Blank),
    ]
}

fn render(lines: &[Line]) -> (String, usize) {
    let mut source = String::new();
    let mut instructions = 0;
    for (index, line) in lines.iter().enumerate() {
        match line {
            Line::Store => source.push_str("store"),
            Line::Bitrev => source.push_str("BITREV ; reverse"),
            Line::Const(v) => source.push_str(&format!("const {v:#x}")),
            Line::Load(a) => source.push_str(&format!("load {a}")),
            Line::Label => source.push_str(&format!("l{index}:")),
            Line::Blank => source.push_str("   ; blank"),
        }
        if !matches!(line, Line::Label | Line::Blank) {
            instructions += 1;
        }
        source.push('\n');
    }
    (source, instructions)
}

proptest! {
    #[test]
    fn const_word_round_trips(value in any::<u16>()) {
        let word = word_of(&format!("const {value}"));
        prop_assert_eq!(word & 0x3F, 42);
        prop_assert_eq!((word >> 6) & 0xFFFF, u32::from(value));
        prop_assert_eq!(word >> 22, 0);
    }

    #[test]
    fn load_word_round_trips(address in 0u32..=0x00FF_FFFF) {
        let word = word_of(&format!("load 0x{address:X}"));
        prop_assert_eq!(word & 0x3F, 23);
        prop_assert_eq!((word >> 6) & 0x00FF_FFFF, address);
        prop_assert_eq!(word >> 30, 0);
    }

    #[test]
    fn const_beyond_16_bits_is_rejected(value in 0x1_0000u64..=u64::from(u32::MAX)) {
        let err = assemble(&format!("const {value}")).unwrap_err();
        prop_assert!(
            matches!(err.kind, AssemblyErrorKind::ValueOutOfRange { max: 0xFFFF, .. }),
            "unexpected error: {}",
            err
        );
        prop_assert_eq!(err.line, Some(1));
    }

    #[test]
    fn binary_length_is_four_bytes_per_instruction(
        lines in prop::collection::vec(line_strategy(), 0..64)
    ) {
        let (source, instructions) = render(&lines);
        let program = assemble(&source).unwrap();
        let binary = assemble_to_binary(&source).unwrap();
        prop_assert_eq!(program.len(), instructions);
        prop_assert_eq!(binary.len(), 4 * program.len());
        for (index, instruction) in program.iter().enumerate() {
            prop_assert_eq!(instruction.address as usize, index);
        }
    }

    #[test]
    fn forward_and_backward_references_agree(before in 0usize..20, after in 0usize..20) {
        let mut source = String::from("load target\n");
        source.push_str(&"store\n".repeat(before));
        source.push_str("target:\n");
        source.push_str(&"bitrev\n".repeat(after));
        source.push_str("const target\n");

        let program = assemble(&source).unwrap();
        let expected = u32::try_from(before + 1).unwrap();
        prop_assert_eq!(&program[0].operand, &Operand::Value(expected));
        prop_assert_eq!(&program[program.len() - 1].operand, &Operand::Value(expected));
    }
}

#[test]
fn operandless_opcodes_encode_bare_id() {
    assert_eq!(word_of("store").to_le_bytes(), [0x01, 0x00, 0x00, 0x00]);
    assert_eq!(word_of("bitrev").to_le_bytes(), [0x3C, 0x00, 0x00, 0x00]);
}
