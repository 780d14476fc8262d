//! Find command implementation.

use textseek_protocol::{Response, ResponseData};

use crate::cli::{FindArgs, Globals};
use crate::output::Output;

pub async fn run(globals: &Globals, args: FindArgs, output: &Output) -> anyhow::Result<()> {
    let globals = globals.clone();
    let config = args.locate.to_config();
    let source = args.source;
    let query = args.text;

    let target = query.clone();
    let result =
        tokio::task::spawn_blocking(move || super::locate(&globals, &source, config, &target)).await?;

    match super::or_exit(output, result) {
        Some(location) => {
            output.print_response(&Response::success(ResponseData::Located(location)));
        }
        None => {
            output.print_response(&Response::success(ResponseData::NotFound { query }));
            std::process::exit(1);
        }
    }

    Ok(())
}
