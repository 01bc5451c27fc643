//! # Codegen Common
//!
//! 这个 crate 提供了 Lorn RegGen 注册代码生成器的公共数据模型。
//!
//! ## 核心类型
//!
//! - [`ComponentDeclaration`] - 参与注册的组件声明
//! - [`RegistrationIntent`] - 附加在声明上的注册意图
//! - [`RegistrationDescriptor`] - 解析完成的注册描述符
//! - [`Diagnostic`] - 结构化诊断信息
//! - [`BuildConfiguration`] - 构建配置键值查找
//!
//! ## 设计原则
//!
//! - 所有中间值都是每次生成过程重建的不可变快照
//! - 宿主工具链通过 serde 以数据形式传入声明图
//! - 提取逻辑只消费解码后的强类型意图，不再检查原始参数形状

pub mod configuration;
pub mod declaration;
pub mod descriptor;
pub mod diagnostics;
pub mod errors;
pub mod intent;

pub use configuration::*;
pub use declaration::*;
pub use descriptor::*;
pub use diagnostics::*;
pub use errors::*;
pub use intent::*;
