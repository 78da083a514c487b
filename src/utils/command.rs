use crate::error::{FileStatsError, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Запускает команду и возвращает stdout, если она завершилась успешно за `limit`.
///
/// По истечении таймаута процесс убивается.
pub async fn run_with_timeout(mut cmd: Command, tool: &str, limit: Duration) -> Result<String> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = tokio::time::timeout(limit, cmd.output())
        .await
        .map_err(|_| FileStatsError::Timeout {
            tool: tool.to_string(),
            millis: limit.as_millis(),
        })?
        .map_err(|e| crate::fs_error!(command_failed, "{} не найден: {}", tool, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("{} вернул ошибку ({}): {}", tool, output.status, stderr.trim());
        return FileStatsError::command_failed(format!("{} вернул ошибку: {}", tool, output.status));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// То же, что [`run_with_timeout`], для команды с аргументами в окружении текущей сессии
pub async fn run_tool(program: &str, args: &[&str], limit: Duration) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    run_with_timeout(cmd, program, limit).await
}
