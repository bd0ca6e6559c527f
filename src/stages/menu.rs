//=========================================================================
// Main Menu Stage
//=========================================================================
//
// Title menu with two entries. Up/Down move the cursor, Enter picks,
// Escape quits.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::error::{ErrorCode, StageError};
use crate::core::frame::palette::{Fade, FadeDirection};
use crate::core::input::{Control, LoopMode};
use crate::core::resources::FontSlot;
use crate::core::session::Session;
use crate::core::stage::{FrameContext, Stage};
use crate::core::LoopOutcome;

//=== MenuEntry ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Continue,
    Quit,
}

impl MenuEntry {
    const ALL: [MenuEntry; 2] = [Self::Continue, Self::Quit];

    fn outcome(self) -> LoopOutcome {
        match self {
            Self::Continue => LoopOutcome::Continue,
            Self::Quit => LoopOutcome::Quit,
        }
    }
}

//=== MainMenu ============================================================

pub struct MainMenu {
    selected: usize,
    fade: Fade,
}

impl MainMenu {
    /// Fails when the session no longer holds the menu font.
    pub fn new(session: &Session) -> Result<Self, StageError> {
        let fonts = session
            .fonts()
            .ok_or_else(|| StageError::new(ErrorCode::Unknown, "menu built without fonts"))?;
        debug!(
            target: "stage",
            "Menu font has {} bytes of glyph data",
            fonts.get(FontSlot::Menu).encoded().map_or(0, <[u8]>::len)
        );

        Ok(Self {
            selected: 0,
            fade: Fade::new(FadeDirection::In, 250),
        })
    }

    pub fn selected(&self) -> MenuEntry {
        MenuEntry::ALL[self.selected]
    }

    fn move_cursor(&mut self, down: bool) {
        let count = MenuEntry::ALL.len();
        self.selected = if down {
            (self.selected + 1) % count
        } else {
            (self.selected + count - 1) % count
        };
    }
}

impl Stage for MainMenu {
    fn run(&mut self, ctx: &mut FrameContext<'_>) -> LoopOutcome {
        info!(target: "stage", "Main menu");

        loop {
            let outcome = ctx.tick(LoopMode::Normal, Some(&mut self.fade));
            if outcome.is_interrupt() {
                return outcome;
            }

            if ctx.take_press(Control::Escape) {
                return LoopOutcome::Quit;
            }
            if ctx.take_press(Control::Up) {
                self.move_cursor(false);
            }
            if ctx.take_press(Control::Down) {
                self.move_cursor(true);
            }
            if ctx.take_press(Control::Enter) {
                debug!(target: "stage", "Menu picked {:?}", self.selected());
                return self.selected().outcome();
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::FrameLoop;
    use crate::core::input::{Controls, KeyCode, PlatformEvent};
    use crate::core::profile::PlatformProfile;
    use crate::testing::{healthy_backends, test_launch};

    fn run_menu(events: &[PlatformEvent]) -> (LoopOutcome, MenuEntry) {
        let (backends, rig) = healthy_backends();
        let mut session = Session::acquire(test_launch(&["stagehand"]), backends).expect("session");
        let mut frame_loop = FrameLoop::new(Box::new(Controls::new()), &PlatformProfile::desktop());
        let mut menu = MainMenu::new(&session).expect("menu");

        // Presses queued together land in the same frame.
        rig.events.borrow_mut().extend(events.iter().copied());

        let outcome = menu.run(&mut FrameContext::new(&mut session, &mut frame_loop));
        (outcome, menu.selected())
    }

    #[test]
    fn enter_on_first_entry_continues() {
        let (outcome, entry) = run_menu(&[PlatformEvent::KeyDown(KeyCode::Enter)]);
        assert_eq!(entry, MenuEntry::Continue);
        assert_eq!(outcome, LoopOutcome::Continue);
    }

    #[test]
    fn down_then_enter_picks_quit() {
        let (outcome, entry) = run_menu(&[
            PlatformEvent::KeyDown(KeyCode::ArrowDown),
            PlatformEvent::KeyDown(KeyCode::Enter),
        ]);
        assert_eq!(entry, MenuEntry::Quit);
        assert_eq!(outcome, LoopOutcome::Quit);
    }

    #[test]
    fn escape_quits() {
        let (outcome, _) = run_menu(&[PlatformEvent::KeyDown(KeyCode::Escape)]);
        assert_eq!(outcome, LoopOutcome::Quit);
    }

    #[test]
    fn window_close_quits() {
        let (outcome, _) = run_menu(&[PlatformEvent::Quit]);
        assert_eq!(outcome, LoopOutcome::Quit);
    }

    #[test]
    fn cursor_wraps_around() {
        let mut menu = MainMenu {
            selected: 0,
            fade: Fade::new(FadeDirection::In, 1),
        };

        menu.move_cursor(false);
        assert_eq!(menu.selected(), MenuEntry::Quit);
        menu.move_cursor(true);
        assert_eq!(menu.selected(), MenuEntry::Continue);
    }

    #[test]
    fn menu_requires_fonts() {
        let (backends, _rig) = healthy_backends();
        let mut session = Session::acquire(test_launch(&["stagehand"]), backends).expect("session");
        session.release();

        let err = MainMenu::new(&session).err().expect("no fonts");
        assert_eq!(err.code, ErrorCode::Unknown);
    }
}
