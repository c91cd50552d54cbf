use anyhow::Result;

fn main() -> Result<()> {
    codex_session_export::cli::run()
}
