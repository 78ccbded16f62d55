use serde::{Deserialize, Serialize};

use crate::error::{BulletGraphError, BulletGraphResult};
use crate::render::{
    CirclePrimitive, DrawingSurface, LinePrimitive, RectPrimitive, Style, TextPrimitive,
};

/// One call received by a [`RecordingSurface`]. Styles are kept in their
/// serialized `key:value;...` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    DocumentTitle {
        title: String,
    },
    Rect {
        rect: RectPrimitive,
        style: Option<String>,
    },
    Line {
        line: LinePrimitive,
        style: Option<String>,
    },
    Circle {
        circle: CirclePrimitive,
        style: Option<String>,
    },
    Text {
        text: TextPrimitive,
        style: Option<String>,
    },
    GroupBegin {
        style: String,
    },
    GroupEnd,
}

/// Headless surface used by tests and dry runs.
///
/// It validates every primitive and the group nesting, so tests catch bad
/// geometry before a real backend sees it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    open_groups: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn open_groups(&self) -> usize {
        self.open_groups
    }

    pub fn rects(&self) -> impl Iterator<Item = (&RectPrimitive, Option<&str>)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect { rect, style } => Some((rect, style.as_deref())),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&TextPrimitive, Option<&str>)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, style } => Some((text, style.as_deref())),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line { line, .. } => Some(line),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Circle { circle, .. } => Some(circle),
            _ => None,
        })
    }

    /// Errors unless every opened group has been closed.
    pub fn finish(&self) -> BulletGraphResult<()> {
        if self.open_groups != 0 {
            return Err(BulletGraphError::UnbalancedGroups {
                open: self.open_groups,
            });
        }
        Ok(())
    }
}

fn style_string(style: Option<&Style>) -> Option<String> {
    style.map(ToString::to_string)
}

impl DrawingSurface for RecordingSurface {
    fn set_document_title(&mut self, title: &str) -> BulletGraphResult<()> {
        self.commands.push(DrawCommand::DocumentTitle {
            title: title.to_owned(),
        });
        Ok(())
    }

    fn rect(&mut self, rect: RectPrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        rect.validate()?;
        self.commands.push(DrawCommand::Rect {
            rect,
            style: style_string(style),
        });
        Ok(())
    }

    fn line(&mut self, line: LinePrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        line.validate()?;
        self.commands.push(DrawCommand::Line {
            line,
            style: style_string(style),
        });
        Ok(())
    }

    fn circle(&mut self, circle: CirclePrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        circle.validate()?;
        self.commands.push(DrawCommand::Circle {
            circle,
            style: style_string(style),
        });
        Ok(())
    }

    fn text(&mut self, text: &TextPrimitive, style: Option<&Style>) -> BulletGraphResult<()> {
        text.validate()?;
        self.commands.push(DrawCommand::Text {
            text: text.clone(),
            style: style_string(style),
        });
        Ok(())
    }

    fn group_style_begin(&mut self, style: &Style) -> BulletGraphResult<()> {
        self.open_groups += 1;
        self.commands.push(DrawCommand::GroupBegin {
            style: style.to_string(),
        });
        Ok(())
    }

    fn group_style_end(&mut self) -> BulletGraphResult<()> {
        if self.open_groups == 0 {
            return Err(BulletGraphError::UnbalancedGroups { open: 0 });
        }
        self.open_groups -= 1;
        self.commands.push(DrawCommand::GroupEnd);
        Ok(())
    }
}
