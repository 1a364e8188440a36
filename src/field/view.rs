//! Rendering for the field component.

use super::model::Model;
use super::types::Align;
use unicode_width::UnicodeWidthStr;

impl Model {
    /// Renders prompt, value and caret on one line.
    pub fn view(&self) -> String {
        let prompt = self.styles.prompt.render(&self.prompt);
        if self.value.is_empty() && !self.placeholder.is_empty() {
            return format!("{}{}", prompt, self.placeholder_view());
        }

        let end = self.offset_right.min(self.value.len());
        let start = self.offset.min(end);
        let window = &self.value[start..end];
        let pos = self.pos.saturating_sub(start).min(window.len());

        let before: String = window[..pos].iter().collect();
        let mut content_width = before.width();
        let mut body = String::new();
        if !before.is_empty() {
            body.push_str(&self.styles.text.render(&before));
        }

        let mut cur = self.cursor.clone();
        if pos < window.len() {
            let under = window[pos].to_string();
            content_width += under.width();
            cur.set_char(&under);
            body.push_str(&cur.view());

            let after: String = window[pos + 1..].iter().collect();
            if !after.is_empty() {
                content_width += after.width();
                body.push_str(&self.styles.text.render(&after));
            }
        } else {
            content_width += 1;
            cur.set_char(" ");
            body.push_str(&cur.view());
        }

        format!("{}{}", prompt, self.align_within(body, content_width))
    }

    fn placeholder_view(&self) -> String {
        let mut chars = self.placeholder.chars();
        let first = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let rest: String = chars.collect();

        let mut cur = self.cursor.clone();
        cur.set_char(&first);
        let mut body = cur.view();
        if !rest.is_empty() {
            body.push_str(&self.styles.placeholder.render(&rest));
        }

        let content_width = self.placeholder.width().max(1);
        if self.width > 0 && content_width < self.width {
            let pad = " ".repeat(self.width - content_width);
            body.push_str(&self.styles.placeholder.render(&pad));
        }
        body
    }

    fn align_within(&self, body: String, content_width: usize) -> String {
        if self.width == 0 || content_width >= self.width {
            return body;
        }
        let pad = self.width - content_width;
        let (left, right) = match self.align {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
            Align::Center => (pad / 2, pad - pad / 2),
        };
        let mut out = String::new();
        if left > 0 {
            out.push_str(&self.styles.text.render(&" ".repeat(left)));
        }
        out.push_str(&body);
        if right > 0 {
            out.push_str(&self.styles.text.render(&" ".repeat(right)));
        }
        out
    }
}
