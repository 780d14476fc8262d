//! Read command implementation (OCR dump).

use textseek_protocol::{Response, ResponseData};

use crate::cli::{Globals, ReadArgs};
use crate::output::Output;

pub async fn run(globals: &Globals, args: ReadArgs, output: &Output) -> anyhow::Result<()> {
    let globals = globals.clone();
    let source = args.source;

    // OCR is CPU-bound
    let result = tokio::task::spawn_blocking(move || super::read_regions(&globals, &source)).await?;
    let regions = super::or_exit(output, result);

    output.print_response(&Response::success(ResponseData::Regions { regions }));
    Ok(())
}
