//! 游戏错误处理模块
//!
//! 核心引擎按设计不返回错误（被拒绝的输入、缺失的几何信息都退化为
//! 无事发生），因此错误类型只出现在终端前端的边界上。

use thiserror::Error;

/// 前端运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// 终端IO错误（raw mode、备用屏幕、绘制）
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// 渲染错误
    #[error("Render error: {0}")]
    Render(String),

    /// 前端装配错误
    #[error("Frontend error: {0}")]
    Frontend(#[from] anyhow::Error),
}

/// 处理错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::Terminal(e) => match e.kind() {
            std::io::ErrorKind::PermissionDenied => "没有权限访问终端".to_string(),
            _ => format!("终端错误: {}", e),
        },
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: GameError = io.into();
        assert!(matches!(err, GameError::Terminal(_)));
    }
}
