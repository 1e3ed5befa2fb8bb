//! 策略值模型。
//!
//! 设计：
//! - [`PolicyValue`] 是自带类型判别的标签联合；`None` 同时承担“读取时缺失”
//!   与“写回时删除”两种语义
//! - 未识别的注册表类型在读取时降级为 `Binary`，写回保留原始字节
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::section::GroupPolicySection;

/// 注册表策略值（标签联合）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PolicyValue {
    #[default]
    /// 值缺失：读取时表示不存在，写回时作为删除哨兵。
    None,
    /// REG_DWORD（32 位整数）。
    Dword(u32),
    /// REG_QWORD（64 位整数）。
    Qword(u64),
    /// REG_SZ（字符串）。
    String(String),
    /// REG_EXPAND_SZ（含环境变量引用的可展开字符串）。
    ExpandString(String),
    /// REG_MULTI_SZ（字符串列表）。
    MultiString(Vec<String>),
    /// REG_BINARY（原始字节；未识别的类型也降级到此变体）。
    Binary(Vec<u8>),
}

impl PolicyValue {
    /// 是否为缺失/删除哨兵。
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// 类型判别名（与注册表类型名对应，用于展示与日志）。
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Dword(_) => "dword",
            Self::Qword(_) => "qword",
            Self::String(_) => "sz",
            Self::ExpandString(_) => "expand_sz",
            Self::MultiString(_) => "multi_sz",
            Self::Binary(_) => "binary",
        }
    }

    /// 取 DWORD 负载（非 DWORD 变体返回 `None`）。
    pub fn as_dword(&self) -> Option<u32> {
        match self {
            Self::Dword(v) => Some(*v),
            _ => None,
        }
    }

    /// 取字符串负载（`String` 与 `ExpandString` 均可）。
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::ExpandString(s) => Some(s),
            _ => None,
        }
    }
}

impl From<u32> for PolicyValue {
    fn from(v: u32) -> Self {
        Self::Dword(v)
    }
}

impl From<u64> for PolicyValue {
    fn from(v: u64) -> Self {
        Self::Qword(v)
    }
}

impl From<&str> for PolicyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for PolicyValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<String>> for PolicyValue {
    fn from(v: Vec<String>) -> Self {
        Self::MultiString(v)
    }
}

impl From<Vec<u8>> for PolicyValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Binary(v)
    }
}

impl fmt::Display for PolicyValue {
    /// 渲染为“负载 (类型名)”的形式。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "(none)"),
            Self::Dword(v) => write!(f, "{v} (dword)"),
            Self::Qword(v) => write!(f, "{v} (qword)"),
            Self::String(s) => write!(f, "{s} (sz)"),
            Self::ExpandString(s) => write!(f, "{s} (expand_sz)"),
            Self::MultiString(v) => write!(f, "{} (multi_sz)", v.join(";")),
            Self::Binary(b) => write!(f, "{} bytes (binary)", b.len()),
        }
    }
}

/// 一次策略读取的完整结果：定位（节/键路径/值名）加取值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPolicyValue {
    /// 目标节。
    pub section: GroupPolicySection,
    /// 节根键下的子键路径。
    pub registry_key_path: String,
    /// 注册表值名。
    pub registry_value_name: String,
    /// 取到的值（缺失为 [`PolicyValue::None`]）。
    pub value: PolicyValue,
}

impl fmt::Display for GroupPolicyValue {
    /// 渲染为 `节\键路径!值名 = 值 (类型)` 的形式。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\\{}!{} = {}",
            self.section.name(),
            self.registry_key_path,
            self.registry_value_name,
            self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// `None` 是缺失哨兵且为默认值。
    fn none_is_default_and_absent() {
        assert!(PolicyValue::default().is_none());
        assert!(!PolicyValue::Dword(0).is_none());
    }

    #[test]
    /// 类型判别名与变体一一对应。
    fn kind_names() {
        assert_eq!(PolicyValue::None.kind_name(), "none");
        assert_eq!(PolicyValue::Dword(1).kind_name(), "dword");
        assert_eq!(PolicyValue::String("x".into()).kind_name(), "sz");
        assert_eq!(PolicyValue::MultiString(vec![]).kind_name(), "multi_sz");
        assert_eq!(PolicyValue::Binary(vec![0]).kind_name(), "binary");
    }

    #[test]
    /// 展示格式与原生工具的“值 (类型)”习惯一致。
    fn display_format() {
        let v = GroupPolicyValue {
            section: GroupPolicySection::Machine,
            registry_key_path: "Software\\Policies\\Test".to_string(),
            registry_value_name: "Flag".to_string(),
            value: PolicyValue::Dword(1),
        };
        assert_eq!(v.to_string(), "Machine\\Software\\Policies\\Test!Flag = 1 (dword)");
    }

    #[test]
    /// 常用负载的 From 转换。
    fn from_conversions() {
        assert_eq!(PolicyValue::from(7u32), PolicyValue::Dword(7));
        assert_eq!(PolicyValue::from("a"), PolicyValue::String("a".into()));
        assert_eq!(
            PolicyValue::from(vec![1u8, 2]),
            PolicyValue::Binary(vec![1, 2])
        );
    }
}
