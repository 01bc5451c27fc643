//! 结构化诊断定义
//!
//! 提供生成过程向宿主报告错误所需的诊断类型和接收器接口

use crate::errors::GeneratorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 重复注册诊断的固定错误码
pub const DUPLICATE_REGISTRATION_CODE: &str = "RegisterRepeated";

/// 源位置信息
///
/// 指向触发诊断的注册意图在宿主源码中的位置
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// 源文件路径
    pub file: String,
    /// 行号（从 1 开始）
    pub line: u32,
    /// 列号（从 1 开始）
    pub column: u32,
}

impl SourceLocation {
    /// 创建新的源位置
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// 诊断严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    /// 错误，生成过程失败
    Error,
    /// 警告，不影响生成结果
    Warning,
}

/// 结构化诊断
///
/// 生成单元校验失败时产生，由宿主原样呈现给用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 固定错误码
    pub code: &'static str,
    /// 严重级别
    pub severity: DiagnosticSeverity,
    /// 诊断消息
    pub message: String,
    /// 触发诊断的意图源位置
    pub location: SourceLocation,
}

impl Diagnostic {
    /// 创建重复注册诊断
    ///
    /// 消息模板固定，以冲突的实现类型名称参数化
    pub fn duplicate_registration(
        implementation_type: impl AsRef<str>,
        location: SourceLocation,
    ) -> Self {
        Self {
            code: DUPLICATE_REGISTRATION_CODE,
            severity: DiagnosticSeverity::Error,
            message: format!(
                "无法为 '{}' 生成注册代码: 注册项重复",
                implementation_type.as_ref()
            ),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.code, self.message, self.location)
    }
}

/// 诊断接收器 trait
///
/// 由宿主实现，接收生成过程产生的全部诊断
#[async_trait]
pub trait DiagnosticSink: Send + Sync {
    /// 报告一条诊断
    async fn report(&self, diagnostic: Diagnostic) -> Result<(), GeneratorError>;
}

/// 内存中的诊断接收器实现
///
/// 按报告顺序保存诊断，主要用于测试和进程内宿主
#[derive(Debug, Default)]
pub struct InMemoryDiagnosticSink {
    diagnostics: tokio::sync::RwLock<Vec<Diagnostic>>,
}

impl InMemoryDiagnosticSink {
    /// 创建新的内存接收器
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取已报告的全部诊断
    pub async fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.read().await.clone()
    }

    /// 取出并清空已报告的诊断
    pub async fn drain(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics.write().await;
        std::mem::take(&mut *diagnostics)
    }
}

#[async_trait]
impl DiagnosticSink for InMemoryDiagnosticSink {
    async fn report(&self, diagnostic: Diagnostic) -> Result<(), GeneratorError> {
        self.diagnostics.write().await.push(diagnostic);
        Ok(())
    }
}
