//! Seek command implementation: find a text, then move the cursor to it.

use textseek_core::{move_to_location, EnigoPointer};
use textseek_protocol::{ErrorCode, Response, ResponseData};

use crate::cli::{Globals, SeekArgs};
use crate::output::Output;

pub async fn run(globals: &Globals, args: SeekArgs, output: &Output) -> anyhow::Result<()> {
    let globals = globals.clone();
    let config = args.locate.to_config();
    let motion = args.motion.to_motion();
    let source = args.source;
    let query = args.text;

    let target = query.clone();
    let result =
        tokio::task::spawn_blocking(move || super::locate(&globals, &source, config, &target)).await?;

    let location = match super::or_exit(output, result) {
        Some(location) => location,
        None => output.fail(ErrorCode::NotFound, &format!("Could not find '{}'", query)),
    };

    // JSON mode reports only the final move
    if !output.is_json() {
        output.print_response(&Response::success(ResponseData::Located(location.clone())));
    }

    let (x, y) = (location.x, location.y);
    let text = location.text.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut pointer = EnigoPointer::new()?;
        move_to_location(&mut pointer, x, y, &text, &motion)
    })
    .await?;
    super::or_exit(output, result);

    output.print_response(&Response::success(ResponseData::Moved {
        text: location.text,
        x,
        y,
    }));
    Ok(())
}
