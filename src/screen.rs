//! Screen state machine
//!
//! MENU -> PLAYING -> GAME_OVER -> (PLAYING | MENU), and MENU <-> RANKING.

use serde::Serialize;

/// Which screen the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    Menu,
    Playing,
    GameOver { score: u64, high_score: u64 },
    Ranking,
}

/// Actions that trigger screen transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    StartGame,
    OpenRanking,
    /// Issued by the run controller when a collision ends the run
    RunEnded { score: u64, high_score: u64 },
    PlayAgain,
    BackToMenu,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Menu => "MENU",
            Screen::Playing => "PLAYING",
            Screen::GameOver { .. } => "GAME_OVER",
            Screen::Ranking => "RANKING",
        }
    }

    /// Target screen for `action`, or None if the action is not valid here
    pub fn next(self, action: ScreenAction) -> Option<Screen> {
        use Screen::*;
        use ScreenAction::*;

        match (self, action) {
            (Menu, StartGame) => Some(Playing),
            (Menu, OpenRanking) => Some(Ranking),
            (Ranking, BackToMenu) => Some(Menu),
            (Playing, RunEnded { score, high_score }) => Some(GameOver { score, high_score }),
            (GameOver { .. }, PlayAgain) => Some(Playing),
            (GameOver { .. }, BackToMenu) => Some(Menu),
            _ => None,
        }
    }

    /// Entering this screen starts a fresh run
    pub fn starts_run(self) -> bool {
        self == Screen::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_loop() {
        let s = Screen::Menu;
        let s = s.next(ScreenAction::StartGame).expect("menu -> playing");
        let s = s
            .next(ScreenAction::RunEnded {
                score: 7,
                high_score: 12,
            })
            .expect("playing -> game over");
        assert_eq!(
            s,
            Screen::GameOver {
                score: 7,
                high_score: 12
            }
        );
        assert_eq!(s.next(ScreenAction::PlayAgain), Some(Screen::Playing));
        assert_eq!(s.next(ScreenAction::BackToMenu), Some(Screen::Menu));
    }

    #[test]
    fn test_ranking_round_trip() {
        let s = Screen::Menu.next(ScreenAction::OpenRanking);
        assert_eq!(s, Some(Screen::Ranking));
        assert_eq!(Screen::Ranking.next(ScreenAction::BackToMenu), Some(Screen::Menu));
    }

    #[test]
    fn test_invalid_transitions() {
        assert_eq!(Screen::Menu.next(ScreenAction::PlayAgain), None);
        assert_eq!(Screen::Playing.next(ScreenAction::BackToMenu), None);
        assert_eq!(Screen::Ranking.next(ScreenAction::StartGame), None);
        assert_eq!(
            Screen::Menu.next(ScreenAction::RunEnded {
                score: 1,
                high_score: 1
            }),
            None
        );
    }
}
