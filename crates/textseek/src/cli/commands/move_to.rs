//! Move command implementation.

use textseek_core::{move_to_location, EnigoPointer};
use textseek_protocol::{Response, ResponseData};

use crate::cli::MoveArgs;
use crate::output::Output;

pub async fn run(args: MoveArgs, output: &Output) -> anyhow::Result<()> {
    let motion = args.motion.to_motion();
    let (x, y) = (args.x, args.y);
    let label = args.label;

    let text = label.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut pointer = EnigoPointer::new()?;
        move_to_location(&mut pointer, x, y, &text, &motion)
    })
    .await?;
    super::or_exit(output, result);

    output.print_response(&Response::success(ResponseData::Moved { text: label, x, y }));
    Ok(())
}
