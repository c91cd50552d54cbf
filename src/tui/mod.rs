// Interactive session browser
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
pub use terminal::TerminalManager;

use crate::config::Settings;
use crate::models::SessionInfo;

/// Run the interactive browser over the discovered sessions.
pub fn run_interactive(sessions: Vec<SessionInfo>, settings: Settings) -> Result<()> {
    let mut manager = TerminalManager::new()?;

    let mut app = App::new(sessions, settings);
    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res
}
