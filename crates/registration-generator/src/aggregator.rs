//! 描述符聚合与校验
//!
//! 管线的唯一串行化点：在四个种类集合全部物化后按固定顺序合并，
//! 顺序检查重复键，保证冲突检测结果与线程调度无关

use codegen_common::{Diagnostic, DuplicateKey, RegistrationDescriptor};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, warn};

/// 聚合结果
///
/// 全有或全无：任意位置存在冲突即丢弃全部描述符，
/// 不相关的无冲突描述符同样被抑制
#[derive(Debug)]
pub enum AggregationOutcome {
    /// 校验通过，描述符保持种类优先的发现顺序
    Success(Vec<RegistrationDescriptor>),
    /// 校验失败，每个参与冲突的描述符对应一条诊断
    Failure(Vec<Diagnostic>),
}

/// 合并各种类的描述符集合并执行唯一性校验
///
/// 入参集合必须按固定种类顺序排列，各集合内部保持发现顺序。
/// 扫描总是进行到底以报告全部冲突，而非只报告第一处
pub fn aggregate(collections: Vec<Vec<RegistrationDescriptor>>) -> AggregationOutcome {
    let merged: Vec<RegistrationDescriptor> = collections.into_iter().flatten().collect();

    // 每次生成过程新建的唯一性索引，随本次过程一起丢弃
    let mut index: HashMap<DuplicateKey, (usize, bool)> = HashMap::new();
    let mut diagnostics = Vec::new();

    for (position, descriptor) in merged.iter().enumerate() {
        match index.entry(descriptor.duplicate_key()) {
            Entry::Vacant(entry) => {
                entry.insert((position, false));
            }
            Entry::Occupied(mut entry) => {
                let (incumbent, incumbent_reported) = entry.get_mut();
                if !*incumbent_reported {
                    let first = &merged[*incumbent];
                    diagnostics.push(Diagnostic::duplicate_registration(
                        &first.implementation_type,
                        first.location.clone(),
                    ));
                    *incumbent_reported = true;
                }
                diagnostics.push(Diagnostic::duplicate_registration(
                    &descriptor.implementation_type,
                    descriptor.location.clone(),
                ));
            }
        }
    }

    if diagnostics.is_empty() {
        debug!(count = merged.len(), "描述符聚合通过");
        AggregationOutcome::Success(merged)
    } else {
        warn!(conflicts = diagnostics.len(), "检测到重复注册, 抑制本单元的模块生成");
        AggregationOutcome::Failure(diagnostics)
    }
}
