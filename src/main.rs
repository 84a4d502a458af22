use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = filestamp::cli::parse();
    app::run(args)
}
