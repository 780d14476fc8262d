//! Tour command implementation: move the cursor through a list of waypoints.

use textseek_core::{tour, EnigoPointer};
use textseek_protocol::{ErrorCode, Response, ResponseData, Waypoint};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::TourArgs;
use crate::output::Output;

pub async fn run(args: TourArgs, output: &Output) -> anyhow::Result<()> {
    let path = shellexpand::tilde(&args.file).into_owned();

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => output.fail(ErrorCode::IoError, &format!("Failed to read {}: {}", path, e)),
    };
    let waypoints = match parse_waypoints(&content) {
        Ok(waypoints) => waypoints,
        Err(message) => output.fail(ErrorCode::InvalidRequest, &format!("{}: {}", path, message)),
    };

    if args.confirm {
        // Prompt goes to stderr so --json output stays parseable
        eprintln!("Press Enter to start moving the cursor...");
        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    }

    let motion = args.motion.to_motion();
    let visited = waypoints.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut pointer = EnigoPointer::new()?;
        tour(&mut pointer, &waypoints, &motion)
    })
    .await?;
    super::or_exit(output, result);

    output.print_response(&Response::success(ResponseData::Toured { visited }));
    Ok(())
}

fn parse_waypoints(content: &str) -> Result<Vec<Waypoint>, String> {
    let waypoints: Vec<Waypoint> =
        serde_json::from_str(content).map_err(|e| format!("invalid waypoint list: {}", e))?;
    if waypoints.is_empty() {
        return Err("waypoint list is empty".to_string());
    }
    Ok(waypoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_waypoints() {
        let waypoints = parse_waypoints(
            r#"[{"text": "fsfs", "x": 115, "y": 1185}, {"text": "Dayz", "x": 281, "y": 291}]"#,
        )
        .unwrap();
        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[1].text, "Dayz");
    }

    #[test]
    fn test_parse_waypoints_rejects_empty_and_garbage() {
        assert!(parse_waypoints("[]").is_err());
        assert!(parse_waypoints("{\"x\": 1}").is_err());
        assert!(parse_waypoints("[{\"text\": \"a\"}]").is_err());
    }

    #[test]
    fn test_parse_waypoints_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("route.json");
        std::fs::write(&path, r#"[{"x": 10, "y": 20}]"#).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let waypoints = parse_waypoints(&content).unwrap();
        assert_eq!((waypoints[0].x, waypoints[0].y), (10, 20));
    }
}
