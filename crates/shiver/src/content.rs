//! Demo content: the profile card the skeleton stands in for.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use shiver_core::{Animation, BoneSource, BoneSpec, ContainerStyle, Size, resolve};
use shiver_render::place;

/// One piece of real content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Avatar { initials: String },
    Heading(String),
    Text(String),
}

impl BoneSource for ContentBlock {
    fn bone_spec(&self) -> BoneSpec {
        match self {
            Self::Avatar { .. } => BoneSpec::sized(10.0, 5.0)
                .with_radius(2.0)
                .with_margin(1.0),
            Self::Heading(text) | Self::Text(text) => text_bone(text),
        }
    }
}

/// One row as wide as the text.
fn text_bone(text: &str) -> BoneSpec {
    let width = text.chars().count() as f32;
    BoneSpec::sized(width, 1.0).with_radius(0.0)
}

pub fn profile_card() -> Vec<ContentBlock> {
    vec![
        ContentBlock::Avatar {
            initials: "AL".to_string(),
        },
        ContentBlock::Heading("Ada Lovelace".to_string()),
        ContentBlock::Text("Analyst, Analytical Engine".to_string()),
        ContentBlock::Text("Wrote the first published algorithm".to_string()),
        ContentBlock::Text("intended for a machine.".to_string()),
    ]
}

/// Draw `blocks` in the same boxes their bones would occupy.
pub fn render(blocks: &[ContentBlock], area: Rect, style: &ContainerStyle, buf: &mut Buffer) {
    let measured = Size::new(area.width as f32, area.height as f32);
    let bones = resolve(&[], blocks, Some(measured), Animation::None);
    for (block, bone) in blocks.iter().zip(place(&bones, area, style)) {
        let rect = Rect::new(
            bone.x.round() as u16,
            bone.y.round() as u16,
            bone.size.width.round() as u16,
            bone.size.height.round() as u16,
        )
        .intersection(area);
        match block {
            ContentBlock::Avatar { initials } => {
                let frame = Block::bordered().border_type(BorderType::Rounded).cyan();
                let inner = frame.inner(rect);
                frame.render(rect, buf);
                let text_row = Rect {
                    y: inner.y + inner.height / 2,
                    height: inner.height.min(1),
                    ..inner
                };
                Paragraph::new(initials.as_str())
                    .bold()
                    .alignment(Alignment::Center)
                    .render(text_row, buf);
            }
            ContentBlock::Heading(text) => {
                Paragraph::new(text.as_str()).bold().render(rect, buf);
            }
            ContentBlock::Text(text) => {
                Paragraph::new(text.as_str())
                    .style(Style::new().gray())
                    .render(rect, buf);
            }
        }
    }
}
