use deep_control::{PadModel, PadStack};
use shared::domain::{Coords, PadKind};

/// Draws one pad with the cursor cell in brackets and the gap left blank.
pub fn render_pad(pad: &PadModel) -> Vec<String> {
    let layout = pad.layout();
    let (rows, cols) = layout.extents();
    let cursor = pad.coords().current;

    (1..=rows)
        .map(|row| {
            (1..=cols)
                .map(|col| {
                    let coords = Coords::new(row, col);
                    let glyph = layout
                        .symbol_at(coords)
                        .and_then(|symbol| symbol.glyph())
                        .unwrap_or(' ');
                    if coords == cursor {
                        format!("[{glyph}]")
                    } else {
                        format!(" {glyph} ")
                    }
                })
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Outermost pad first, dial pad last, then the typed code.
pub fn render_stack(stack: &PadStack) -> String {
    let mut out = String::new();
    for (level, pad) in stack.levels().iter().enumerate().rev() {
        let label = match pad.kind() {
            PadKind::Dial => "dial".to_string(),
            PadKind::Direction if level == stack.outermost() => "you".to_string(),
            PadKind::Direction => format!("robot {level}"),
        };
        let coords = pad.coords();
        if coords.is_moving() {
            let (rows, cols) = coords.offset();
            out.push_str(&format!("level {level} ({label}) moved {rows:+},{cols:+}\n"));
        } else {
            out.push_str(&format!("level {level} ({label})\n"));
        }
        for line in render_pad(pad) {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push_str(&format!("code: {}\n", stack.output_code()));
    out
}
