//! 生成模块发射
//!
//! 将通过校验的描述符集合渲染为单个生成模块：
//! 先构建有序的注册语句记录，再经一次模板替换完成渲染，
//! 语句按种类顺序拼接，种类内部保持发现顺序

use codegen_common::{RegistrationDescriptor, RegistrationKind, FALLBACK_NAMESPACE};
use serde::Serialize;
use tracing::debug;

/// 生成模块模板
///
/// 生成代码引用运行时解析器 crate 的类型；
/// `{{view_import}}` 仅在存在视图模型绑定时展开
const MODULE_TEMPLATE: &str = r"//-------------------------------------------------------------------------------
// <auto-generated>
//     此代码由 registration-generator 自动生成{{generated_at}}, 请勿手工修改。
// </auto-generated>
//-------------------------------------------------------------------------------

use registration_runtime::{MutableDependencyResolver, ServiceKey};
{{view_import}}
/// 注册命名空间 `{{namespace}}` 内声明的全部组件。
pub fn {{entry_point}}(resolver: &mut dyn MutableDependencyResolver) {
{{statements}}
}
";

/// 单条注册语句模板
const STATEMENT_TEMPLATE: &str =
    "    resolver.{{verb}}({{payload}}, {{service_type}}, {{contract}});";

/// 存在视图模型绑定时追加的导入行
const VIEW_IMPORT: &str = "use registration_runtime::ViewFor;\n";

/// 生成模块
///
/// 每次生成过程新产出的临时制品，持久化由宿主负责
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedModule {
    /// 暴露的入口函数名，按解析出的命名空间派生以避免多单元冲突
    pub entry_point_name: String,
    /// 渲染完成的源码文本
    pub source_text: String,
}

/// 注册语句记录
///
/// 渲染前的结构化中间形式，排序与边界情况在此层显式处理
#[derive(Debug, Clone)]
struct RegistrationStatement {
    verb: &'static str,
    payload: String,
    service_type: String,
    contract: String,
}

impl RegistrationStatement {
    /// 按种类的语句形状构建语句记录
    fn from_descriptor(descriptor: &RegistrationDescriptor) -> Self {
        let implementation = &descriptor.implementation_type;
        let (verb, payload) = match descriptor.kind {
            // 瞬态与视图模型绑定都按需构造新实例
            RegistrationKind::Transient | RegistrationKind::ViewModelBinding => {
                ("register", format!("|| Box::new({implementation}::default())"))
            }
            RegistrationKind::Constant => {
                ("register_constant", format!("Box::new({implementation}::default())"))
            }
            RegistrationKind::LazySingleton => (
                "register_lazy_singleton",
                format!("|| Box::new({implementation}::default())"),
            ),
        };

        Self {
            verb,
            payload,
            service_type: render_service_type(descriptor.service_type.as_deref()),
            contract: render_contract(descriptor.contract.as_deref()),
        }
    }

    /// 渲染为一行注册语句
    fn render(&self) -> String {
        STATEMENT_TEMPLATE
            .replace("{{verb}}", self.verb)
            .replace("{{payload}}", &self.payload)
            .replace("{{service_type}}", &self.service_type)
            .replace("{{contract}}", &self.contract)
    }
}

/// 渲染服务类型实参
fn render_service_type(service_type: Option<&str>) -> String {
    match service_type {
        None => "None".to_string(),
        Some(service) => format!("Some(ServiceKey::of::<{service}>())"),
    }
}

/// 渲染契约实参
fn render_contract(contract: Option<&str>) -> String {
    match contract {
        None => "None".to_string(),
        Some(contract) => format!("Some(\"{contract}\")"),
    }
}

/// 按解析出的命名空间派生入口函数名
///
/// 非字母数字分隔符全部剔除；命名空间缺失（回退场景）时
/// 不附加后缀，入口名为固定的 `register_all`
fn entry_point_name(namespace: Option<&str>) -> String {
    let suffix: String = namespace
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|character| character.to_ascii_lowercase())
        .collect();

    if suffix.is_empty() {
        "register_all".to_string()
    } else {
        format!("register_all_{suffix}")
    }
}

/// 调试构建下的生成时间戳片段
fn generated_at_fragment() -> String {
    if cfg!(debug_assertions) {
        format!(" 于 {}", chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"))
    } else {
        String::new()
    }
}

/// 将通过校验的描述符集合渲染为生成模块
///
/// 入参保持聚合器输出的种类优先顺序；`namespace` 为解析出的
/// 命名空间，缺失时套用固定回退命名空间
pub fn emit_module(
    namespace: Option<&str>,
    descriptors: &[RegistrationDescriptor],
) -> GeneratedModule {
    let statements: Vec<String> = descriptors
        .iter()
        .map(|descriptor| RegistrationStatement::from_descriptor(descriptor).render())
        .collect();

    let has_view_bindings = descriptors
        .iter()
        .any(|descriptor| descriptor.kind == RegistrationKind::ViewModelBinding);

    let entry_point = entry_point_name(namespace);
    let source_text = MODULE_TEMPLATE
        .replace("{{generated_at}}", &generated_at_fragment())
        .replace(
            "{{view_import}}",
            if has_view_bindings { VIEW_IMPORT } else { "" },
        )
        .replace("{{namespace}}", namespace.unwrap_or(FALLBACK_NAMESPACE))
        .replace("{{entry_point}}", &entry_point)
        .replace("{{statements}}", &statements.join("\n"));

    debug!(
        entry_point = %entry_point,
        statements = statements.len(),
        "生成模块渲染完成"
    );

    GeneratedModule {
        entry_point_name: entry_point,
        source_text,
    }
}
