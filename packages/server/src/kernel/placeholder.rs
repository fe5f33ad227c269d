//! Deterministic placeholder images.
//!
//! Rendered when a real generation call fails or when the selected model is a
//! stand-in. Output is a PNG square filled with a colour derived from the
//! prompt's SHA-256 and labelled with the prompt text, so the same prompt
//! always yields the same bytes.

use std::io::Cursor;

use ab_glyph::{FontRef, PxScale};
use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use sha2::{Digest, Sha256};

use super::ImagePayload;

pub const PLACEHOLDER_SIZE: u32 = 1024;
pub const PLACEHOLDER_MIME: &str = "image/png";

const FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

const LINE_WIDTH: usize = 36;
const MAX_LINES: usize = 8;
const LABEL_SCALE: f32 = 44.0;
const TEXT_SCALE: f32 = 40.0;
const LINE_HEIGHT: u32 = 52;
const BORDER_INSET: u32 = 64;
const BORDER_WIDTH: u32 = 8;
const TEXT_COLOUR: Rgb<u8> = Rgb([255, 255, 255]);

pub fn render_placeholder(label: &str, prompt: &str) -> Result<ImagePayload> {
    let font = FontRef::try_from_slice(FONT_BYTES).context("Embedded placeholder font is invalid")?;
    let (fill, accent) = colours_for(prompt);
    let size = PLACEHOLDER_SIZE;

    let mut canvas = RgbImage::from_pixel(size, size, fill);

    for i in 0..BORDER_WIDTH {
        let offset = BORDER_INSET + i;
        let side = size - 2 * offset;
        draw_hollow_rect_mut(
            &mut canvas,
            Rect::at(offset as i32, offset as i32).of_size(side, side),
            accent,
        );
    }

    draw_centered(&mut canvas, &font, LABEL_SCALE, 130, accent, label);

    let lines = wrap(prompt, LINE_WIDTH, MAX_LINES);
    let block_height = lines.len() as u32 * LINE_HEIGHT;
    let first_line_y = size / 2 + 20 - block_height / 2;
    for (i, line) in lines.iter().enumerate() {
        let y = first_line_y + i as u32 * LINE_HEIGHT;
        draw_centered(&mut canvas, &font, TEXT_SCALE, y, TEXT_COLOUR, line);
    }

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(canvas)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("Failed to encode placeholder PNG")?;

    Ok(ImagePayload::new(bytes, PLACEHOLDER_MIME))
}

fn draw_centered(
    canvas: &mut RgbImage,
    font: &FontRef<'_>,
    scale: f32,
    y: u32,
    colour: Rgb<u8>,
    text: &str,
) {
    let scale = PxScale::from(scale);
    let (width, _) = text_size(scale, font, text);
    let x = canvas.width().saturating_sub(width) / 2;
    draw_text_mut(canvas, colour, x as i32, y as i32, scale, font, text);
}

/// Background and accent colours. Channels are kept in the mid range so
/// white text stays readable.
fn colours_for(prompt: &str) -> (Rgb<u8>, Rgb<u8>) {
    let digest = Sha256::digest(prompt.as_bytes());
    let channel = |b: u8| 48 + (b % 144);
    let fill = [channel(digest[0]), channel(digest[1]), channel(digest[2])];
    let accent = fill.map(|c| c.saturating_add(64));
    (Rgb(fill), Rgb(accent))
}

fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: String = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let kept: String = last.chars().take(width.saturating_sub(1)).collect();
            *last = format!("{}…", kept);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_prompt_renders_identical_png() {
        let a = render_placeholder("Gemini", "a red barn").unwrap();
        let b = render_placeholder("Gemini", "a red barn").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.mime_type, "image/png");
        assert_eq!(a.extension(), "png");
        assert_eq!(openai_client::sniff_mime_type(&a.bytes), "image/png");
    }

    #[test]
    fn renders_a_square_filled_with_the_prompt_colour() {
        let payload = render_placeholder("OpenAI (placeholder)", "a red barn").unwrap();
        let decoded = image::load_from_memory(&payload.bytes).unwrap().to_rgb8();

        assert_eq!(decoded.dimensions(), (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));

        let (fill, accent) = colours_for("a red barn");
        assert_eq!(*decoded.get_pixel(8, 8), fill);
        assert_eq!(*decoded.get_pixel(BORDER_INSET + 2, PLACEHOLDER_SIZE / 2), accent);
    }

    #[test]
    fn prompt_text_is_drawn() {
        // Band across the middle of the square, clear of the label and border
        let changed_in_middle = |prompt: &str| {
            let payload = render_placeholder("Gemini", prompt).unwrap();
            let decoded = image::load_from_memory(&payload.bytes).unwrap().to_rgb8();
            let (fill, _) = colours_for(prompt);
            (400..650)
                .flat_map(|y| (100..924).map(move |x| (x, y)))
                .filter(|&(x, y)| *decoded.get_pixel(x, y) != fill)
                .count()
        };

        assert_eq!(changed_in_middle(""), 0);
        assert!(changed_in_middle("a red barn") > 0);
    }

    #[test]
    fn colour_follows_prompt() {
        assert_ne!(colours_for("a red barn"), colours_for("a blue lake"));
        assert_eq!(colours_for("a red barn"), colours_for("a red barn"));
    }

    #[test]
    fn wrap_splits_on_words_and_caps_lines() {
        let lines = wrap("one two three four five six", 9, 10);
        assert_eq!(lines, vec!["one two", "three", "four five", "six"]);

        let long = "word ".repeat(200);
        let capped = wrap(&long, 20, 3);
        assert_eq!(capped.len(), 3);
        assert!(capped[2].ends_with('…'));
    }

    #[test]
    fn wrap_breaks_oversized_words() {
        let lines = wrap("abcdefghij", 4, 10);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }
}
