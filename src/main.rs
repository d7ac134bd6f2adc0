//! Drawer2D demo: renders color-coded text with a generated bitmap font and
//! prints the result as ASCII art.
//!
//! `--black-shadows` (or `DRAWER2D_BLACK_SHADOWS=true`) switches to solid
//! black shadows. `--bitmapped false` (or `DRAWER2D_BITMAPPED=false`) asks for
//! native fonts, which this demo does not have, so it falls back to the atlas.

use clap::Parser;
use common::Color;
use font::{DrawTextArgs, FontStyle};
use paint::{Bitmap, Drawer2D, Drawer2DOptions};

const CELL: u32 = 8;

#[derive(Parser, Debug)]
#[command(name = "drawer2d", about = "Render color-coded text with a generated bitmap font")]
struct Args {
    /// Draw from the bitmap font atlas instead of a native font.
    #[arg(long, env = "DRAWER2D_BITMAPPED", default_value_t = true, action = clap::ArgAction::Set)]
    bitmapped: bool,

    /// Use solid black text shadows.
    #[arg(long, env = "DRAWER2D_BLACK_SHADOWS", action = clap::ArgAction::SetTrue)]
    black_shadows: bool,

    /// Text to draw, with `&` color codes.
    #[arg(long, default_value = "&fHi &cthere&e!")]
    text: String,

    /// Point size of the drawn text.
    #[arg(long, default_value_t = 16)]
    size: i32,
}

/// A 16×16 atlas whose printable glyphs are hollow boxes of varying width.
fn generated_atlas() -> Bitmap {
    let size = CELL * 16;
    let mut bmp = Bitmap::new(size, size);
    for c in b'!'..=b'~' {
        let ox = (c as u32 & 0x0F) * CELL;
        let oy = (c as u32 >> 4) * CELL;
        let w = 3 + c as u32 % 5;
        for y in 0..7 {
            for x in 0..w {
                if y == 0 || y == 6 || x == 0 || x == w - 1 {
                    bmp.set_pixel((ox + x) as i32, (oy + y) as i32, Color::WHITE.to_argb());
                }
            }
        }
    }
    bmp
}

fn print_ascii(bmp: &Bitmap, width: i32, height: i32) {
    for y in 0..height.min(bmp.height as i32) {
        let line: String = (0..width.min(bmp.width as i32))
            .map(|x| match bmp.get_pixel(x, y).map(Color::from_argb) {
                Some(c) if c.a == 0 => ' ',
                Some(c) if c.r.max(c.g).max(c.b) > 128 => '#',
                Some(_) => '+',
                None => ' ',
            })
            .collect();
        println!("   |{line}|");
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let options = Drawer2DOptions {
        bitmapped_text: args.bitmapped,
        black_text_shadows: args.black_shadows,
        ..Drawer2DOptions::default()
    };
    if !options.bitmapped_text {
        log::warn!("no native font backend available, using the bitmap atlas");
    }

    println!("── Drawer2D ──");
    let mut drawer = Drawer2D::new(options);
    if let Err(e) = drawer.set_font_atlas(generated_atlas()) {
        eprintln!("   failed to load font atlas: {e}");
        std::process::exit(1);
    }
    println!("   atlas cell size: {}", drawer.atlas().cell_size());

    let font = drawer.make_font(args.size, FontStyle::Underline);
    println!(
        "   font height at {}pt: {} ({} with shadow)",
        args.size,
        drawer.font_height(&font, false),
        drawer.font_height(&font, true)
    );

    let text = args.text.as_str();
    let draw_args = DrawTextArgs::new(text, font, true);
    let size = drawer.measure_text(&draw_args);
    println!("   \"{text}\" measures {}x{}", size.width, size.height);

    let mut bmp = Bitmap::allocate_cleared_pow2(size.width.max(0) as u32, size.height.max(0) as u32);
    drawer.draw_text(&mut bmp, &draw_args, 0, 0);
    print_ascii(&bmp, size.width, size.height);

    let mut scratch = Bitmap::new(4, 4);
    match scratch.clear(Color::BLACK, 2, 2, 4, 4) {
        Ok(()) => println!("   cleared scratch bitmap"),
        Err(e) => println!("   clear refused: {e}"),
    }
}
