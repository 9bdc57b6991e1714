use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = export_set::cli::parse();
    app::run(args)
}
