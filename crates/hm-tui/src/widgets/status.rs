//! Status line widget

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use hm_core::Frame;

use crate::theme::Theme;

/// Widget for the two status lines under the board.
pub struct StatusWidget<'a> {
    frame: &'a Frame,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(frame: &'a Frame, theme: &'a Theme) -> Self {
        Self { frame, theme }
    }

    /// First line: counters and distance to the door.
    pub fn summary(&self) -> String {
        let f = self.frame;
        let mut line = format!(
            "Steps:{} Return:{:.2} Dist:{}",
            f.steps, f.episode_return, f.info.distance
        );
        if let Some(reward) = f.last_reward {
            line.push_str(&format!(" Last:{reward:+.2}"));
        }
        if let Some(candies) = &f.observation.candies {
            let left = candies.iter().filter(|c| **c != [-1, -1]).count();
            line.push_str(&format!(" Candy:{left}/{}", candies.len()));
        }
        line
    }

    /// Second line: outcome or key help.
    pub fn hint(&self) -> &'static str {
        if self.frame.terminated {
            "Escaped the mansion!  r: play again  q: quit"
        } else {
            "arrows/hjkl/wasd: move  r: reset  q: quit"
        }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let summary_style = match self.frame.last_reward {
            Some(reward) => Style::default().fg(self.theme.reward_color(reward)),
            None => Style::default().fg(self.theme.text),
        };
        let hint_style = if self.frame.terminated {
            Style::default().fg(self.theme.good).bold()
        } else {
            Style::default().fg(self.theme.text_dim)
        };

        buf.set_stringn(
            area.x,
            area.y,
            self.summary(),
            area.width as usize,
            summary_style,
        );
        if area.height > 1 {
            buf.set_stringn(
                area.x,
                area.y + 1,
                self.hint(),
                area.width as usize,
                hint_style,
            );
        }
    }
}
