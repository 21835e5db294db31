//! PathPrompt component: the one-line input under the board.
//!
//! Stands in for the host file picker (`o`) and also edits the operator
//! notice (`n`). Enter confirms, Esc dismisses. Dismissing the file prompt is
//! reported as an explicit "no file" selection, just like cancelling a picker.

use std::path::{Path, PathBuf};

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use board_core::{platform, FileSelection};

use crate::{
    action::{Action, ComponentId, PromptKind},
    app_state::AppState,
    component::Component,
    theme::{style_prompt, C_MUTED, C_PROMPT_BG, C_PROMPT_FG},
};

pub struct PathPrompt {
    input: Input,
    kind: Option<PromptKind>,
}

impl PathPrompt {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            kind: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    fn open(&mut self, kind: PromptKind, state: &AppState) {
        let prefill = match kind {
            PromptKind::OpenFile => state
                .last_selection
                .clone()
                .unwrap_or_else(|| state.schedule_dir.join(""))
                .display()
                .to_string(),
            PromptKind::Notice => state.notice.clone().unwrap_or_default(),
        };
        self.input = Input::new(prefill);
        self.kind = Some(kind);
    }

    fn close(&mut self) {
        self.kind = None;
        self.input.reset();
    }

    fn confirm(&mut self, kind: PromptKind, state: &AppState) -> Action {
        let value = self.input.value().trim().to_string();
        self.close();
        match kind {
            PromptKind::OpenFile if value.is_empty() => Action::SelectFile(FileSelection::None),
            PromptKind::OpenFile => Action::SelectFile(FileSelection::Path(resolve_path(
                &value,
                &state.schedule_dir,
            ))),
            PromptKind::Notice if value.is_empty() => Action::SetNotice(None),
            PromptKind::Notice => Action::SetNotice(Some(value)),
        }
    }
}

impl Default for PathPrompt {
    fn default() -> Self {
        Self::new()
    }
}

/// Relative paths are taken from the schedule directory; `~/` expands to home.
pub fn resolve_path(raw: &str, schedule_dir: &Path) -> PathBuf {
    let path = platform::expand_home(raw);
    if path.is_absolute() {
        path
    } else {
        schedule_dir.join(path)
    }
}

/// Schedules are expected to be `.csv` files; the extension check ignores case.
pub fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

impl Component for PathPrompt {
    fn id(&self) -> ComponentId {
        ComponentId::PathPrompt
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let Some(kind) = self.kind else {
            return vec![];
        };
        match key.code {
            KeyCode::Enter => vec![self.confirm(kind, state)],
            KeyCode::Esc => {
                self.close();
                match kind {
                    PromptKind::OpenFile => vec![Action::SelectFile(FileSelection::None)],
                    PromptKind::Notice => vec![Action::CancelPrompt],
                }
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                vec![]
            }
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        if let Action::OpenPrompt(kind) = action {
            self.open(*kind, state);
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, _state: &AppState) {
        let Some(kind) = self.kind else {
            return;
        };
        if area.height == 0 || area.width < 4 {
            return;
        }
        let label = match kind {
            PromptKind::OpenFile => " open ▸ ",
            PromptKind::Notice => " notice ▸ ",
        };
        let label_w = label.chars().count() as u16;
        let width = area.width.saturating_sub(label_w + 1) as usize;
        let scroll = self.input.visual_scroll(width);
        let value = self.input.value();

        let body = if value.is_empty() {
            let hint = match kind {
                PromptKind::OpenFile => "path to a .csv schedule (empty = none)",
                PromptKind::Notice => "notice text (empty clears)",
            };
            Span::styled(hint, Style::default().fg(C_MUTED))
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(visible, style_prompt())
        };

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    label,
                    Style::default().fg(C_PROMPT_FG).add_modifier(Modifier::BOLD),
                ),
                body,
            ]))
            .style(Style::default().bg(C_PROMPT_BG)),
            area,
        );

        if focused {
            let cursor_x = area.x + label_w + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn state() -> AppState {
        AppState::new(
            "Departures".into(),
            Some("mind the gap".into()),
            PathBuf::from("/srv/schedules"),
            PathBuf::from("x.log"),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(p: &mut PathPrompt, s: &AppState, text: &str) {
        for c in text.chars() {
            p.handle_key(key(KeyCode::Char(c)), s);
        }
    }

    #[test]
    fn open_prefills_schedule_dir() {
        let s = state();
        let mut p = PathPrompt::new();
        p.on_action(&Action::OpenPrompt(PromptKind::OpenFile), &s);
        assert!(p.is_active());
        assert!(p.input.value().starts_with("/srv/schedules"));
    }

    #[test]
    fn escape_on_file_prompt_selects_nothing() {
        let s = state();
        let mut p = PathPrompt::new();
        p.on_action(&Action::OpenPrompt(PromptKind::OpenFile), &s);
        let actions = p.handle_key(key(KeyCode::Esc), &s);
        assert!(matches!(
            actions.as_slice(),
            [Action::SelectFile(FileSelection::None)]
        ));
        assert!(!p.is_active());
    }

    #[test]
    fn relative_path_resolves_against_schedule_dir() {
        let s = state();
        let mut p = PathPrompt::new();
        p.on_action(&Action::OpenPrompt(PromptKind::OpenFile), &s);
        p.input.reset();
        type_text(&mut p, &s, "today.csv");
        let actions = p.handle_key(key(KeyCode::Enter), &s);
        match actions.as_slice() {
            [Action::SelectFile(FileSelection::Path(path))] => {
                assert_eq!(path, &PathBuf::from("/srv/schedules/today.csv"));
            }
            other => panic!("unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn notice_prompt_edits_and_clears() {
        let s = state();
        let mut p = PathPrompt::new();
        p.on_action(&Action::OpenPrompt(PromptKind::Notice), &s);
        assert_eq!(p.input.value(), "mind the gap");
        type_text(&mut p, &s, "!");
        assert!(matches!(
            p.handle_key(key(KeyCode::Enter), &s).as_slice(),
            [Action::SetNotice(Some(t))] if t == "mind the gap!"
        ));

        p.on_action(&Action::OpenPrompt(PromptKind::Notice), &s);
        p.input.reset();
        assert!(matches!(
            p.handle_key(key(KeyCode::Enter), &s).as_slice(),
            [Action::SetNotice(None)]
        ));
    }

    #[test]
    fn escape_on_notice_prompt_cancels() {
        let s = state();
        let mut p = PathPrompt::new();
        p.on_action(&Action::OpenPrompt(PromptKind::Notice), &s);
        assert!(matches!(
            p.handle_key(key(KeyCode::Esc), &s).as_slice(),
            [Action::CancelPrompt]
        ));
    }

    #[test]
    fn csv_extension_check() {
        assert!(has_csv_extension(Path::new("/srv/today.csv")));
        assert!(has_csv_extension(Path::new("TODAY.CSV")));
        assert!(!has_csv_extension(Path::new("today.txt")));
        assert!(!has_csv_extension(Path::new("today")));
        assert!(!has_csv_extension(Path::new("/srv/.csv")));
    }

    #[test]
    fn absolute_paths_are_kept() {
        assert_eq!(
            resolve_path("/tmp/a.csv", Path::new("/srv")),
            PathBuf::from("/tmp/a.csv")
        );
    }
}
