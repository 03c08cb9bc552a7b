use deep_control::{codec, DeepControl, PadStack};
use shared::{
    domain::{Coords, DialPadValue, Direction, PadSymbol},
    protocol::ControlOutcome,
};

#[test]
fn first_level_left_moves_six_to_five() {
    let mut control = DeepControl::new();
    control.control(1, Direction::Left);

    let dial = &control.stack().levels()[0];
    assert_eq!(dial.coords().previous, Coords::new(2, 3));
    assert_eq!(dial.coords().current, Coords::new(2, 2));
    assert_eq!(control.stack().output_code(), "");
}

#[test]
fn outermost_apply_ripples_down_to_a_digit() {
    let mut control = DeepControl::from_encoding(Some("6AA;"));
    for expected in ["6", "66", "666"] {
        assert_eq!(
            control.press(Direction::Apply),
            ControlOutcome::Emitted { digit: 6 }
        );
        assert_eq!(control.stack().output_code(), expected);
    }
}

#[test]
fn decoded_stack_forces_outermost_apply() {
    let stack = codec::decode("6ULA;12").expect("decode");
    let expected = [
        PadSymbol::Dial(DialPadValue::Digit(6)),
        PadSymbol::Direction(Direction::Up),
        PadSymbol::Direction(Direction::Left),
        PadSymbol::Direction(Direction::Apply),
        PadSymbol::Direction(Direction::Apply),
    ];
    let symbols: Vec<PadSymbol> = stack.symbols().into_iter().flatten().collect();
    assert_eq!(symbols, expected);
    assert_eq!(stack.output_code(), "12");
}

#[test]
fn unknown_dial_character_keeps_active_stack() {
    let mut control = DeepControl::from_encoding(Some("2RD;8"));
    let before = control.stack().clone();
    assert!(control.apply_encoding("X;").is_err());
    assert_eq!(control.stack(), &before);
}

#[test]
fn left_of_one_stays_put() {
    let mut stack = PadStack::new(DialPadValue::Digit(1), &[Direction::Apply], "");
    assert_eq!(
        stack.control(1, Direction::Left),
        ControlOutcome::Blocked {
            level: 0,
            direction: Direction::Left,
        }
    );
    assert_eq!(
        stack.symbols()[0],
        Some(PadSymbol::Dial(DialPadValue::Digit(1)))
    );
}
