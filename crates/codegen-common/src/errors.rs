//! 错误类型定义

use thiserror::Error;

/// 生成器错误类型
///
/// 注册冲突不属于错误：冲突通过诊断接收器报告，
/// 对应生成单元不产出模块，生成过程本身正常结束
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("诊断接收器写入失败: {message}")]
    DiagnosticSinkFailure { message: String },

    #[error("生成单元名称重复: {name}")]
    DuplicateUnitName { name: String },

    #[error("生成单元 '{unit}' 的声明图无效: {message}")]
    InvalidDeclarationGraph { unit: String, message: String },

    #[error("声明提供器加载失败: {message}")]
    DeclarationProviderFailure { message: String },
}

impl GeneratorError {
    /// 创建诊断接收器失败错误
    pub fn sink_failure(message: impl Into<String>) -> Self {
        Self::DiagnosticSinkFailure {
            message: message.into(),
        }
    }

    /// 创建无效声明图错误
    pub fn invalid_declaration_graph(
        unit: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidDeclarationGraph {
            unit: unit.into(),
            message: message.into(),
        }
    }
}

/// 结果类型别名
pub type GeneratorResult<T> = Result<T, GeneratorError>;
