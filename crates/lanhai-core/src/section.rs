//! 组策略节（Section）定义。
//!
//! 说明：
//! - “节”决定一次操作落在 GPO 私有存储的哪个子树（根/用户/计算机）
//! - 数值映射与 gpedit.h 中 GPO_SECTION_* 常量保持一致
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

use serde::{Deserialize, Serialize};

/// 组策略节：选择 GPO 下参与读写的注册表子树。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroupPolicySection {
    #[default]
    /// GPO 根（用户与计算机子树的共同父键）。
    Root,
    /// 用户配置子树（对应 HKCU 视图）。
    User,
    /// 计算机配置子树（对应 HKLM 视图）。
    Machine,
}

impl GroupPolicySection {
    /// 转换为原生 API 的节常量。
    ///
    /// 返回值：
    /// - `Root` = 0、`User` = 1、`Machine` = 2（即 GPO_SECTION_*）
    pub fn native(self) -> u32 {
        match self {
            Self::Root => 0,
            Self::User => 1,
            Self::Machine => 2,
        }
    }

    /// 节的显示名称（用于错误信息与日志）。
    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::User => "User",
            Self::Machine => "Machine",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// 验证节常量映射与原生定义一致。
    fn section_native_constants() {
        assert_eq!(GroupPolicySection::Root.native(), 0);
        assert_eq!(GroupPolicySection::User.native(), 1);
        assert_eq!(GroupPolicySection::Machine.native(), 2);
    }

    #[test]
    /// 验证默认节为 Root。
    fn section_default_is_root() {
        assert_eq!(GroupPolicySection::default(), GroupPolicySection::Root);
    }
}
