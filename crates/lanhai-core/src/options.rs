//! GPO 启用选项与打开设置的位标志编码。
//!
//! 说明：
//! - 启用选项（[`GpoOptions`]）对应原生 GetOptions/SetOptions 的标志字，
//!   位语义与布尔字段相反：置位表示“已禁用”
//! - 打开设置（[`GpoOpenSettings`]）仅在打开 GPO 时传入一次，打开后不可变
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

use serde::{Deserialize, Serialize};

/// GPO 启用选项（用户/计算机两部分设置是否生效）。
///
/// 位标志编码（与原生标志字一致）：
/// - 0x1：用户设置已禁用
/// - 0x2：计算机设置已禁用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpoOptions {
    /// 用户设置是否启用。
    pub user_enabled: bool,
    /// 计算机设置是否启用。
    pub machine_enabled: bool,
}

impl Default for GpoOptions {
    /// 默认两部分均启用（标志字为 0）。
    fn default() -> Self {
        Self {
            user_enabled: true,
            machine_enabled: true,
        }
    }
}

impl GpoOptions {
    /// 写入原生 SetOptions 时使用的掩码：两个位都参与写入。
    pub const MASK: u32 = 0b11;

    /// 从原生标志字解码。
    ///
    /// 参数：
    /// - `flag`：GetOptions 返回的标志字
    pub fn from_flag(flag: u32) -> Self {
        Self {
            user_enabled: flag & 0x1 == 0,
            machine_enabled: flag & 0x2 == 0,
        }
    }

    /// 编码为原生标志字。
    pub fn flag_value(self) -> u32 {
        let mut flag = 0u32;
        if !self.user_enabled {
            flag |= 0x1;
        }
        if !self.machine_enabled {
            flag |= 0x2;
        }
        flag
    }
}

/// GPO 打开设置（仅打开时生效）。
///
/// 位标志编码：
/// - 0x1：加载注册表信息
/// - 0x2：只读打开
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpoOpenSettings {
    /// 是否加载注册表信息（读写注册表类策略时必须开启）。
    pub load_registry_information: bool,
    /// 是否以只读方式打开。
    pub read_only: bool,
}

impl Default for GpoOpenSettings {
    /// 默认加载注册表信息、可写打开（标志字为 1）。
    fn default() -> Self {
        Self {
            load_registry_information: true,
            read_only: false,
        }
    }
}

impl GpoOpenSettings {
    /// 编码为原生打开标志字。
    pub fn flag_value(self) -> u32 {
        let mut flag = 0u32;
        if self.load_registry_information {
            flag |= 0x1;
        }
        if self.read_only {
            flag |= 0x2;
        }
        flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// 双启用编码为 0，双禁用编码为 3。
    fn options_flag_encoding() {
        assert_eq!(GpoOptions::default().flag_value(), 0);
        let disabled = GpoOptions {
            user_enabled: false,
            machine_enabled: false,
        };
        assert_eq!(disabled.flag_value(), 3);
    }

    #[test]
    /// 单独禁用时各占一位（用户 0x1、计算机 0x2）。
    fn options_flag_single_bits() {
        let user_off = GpoOptions {
            user_enabled: false,
            machine_enabled: true,
        };
        assert_eq!(user_off.flag_value(), 1);
        let machine_off = GpoOptions {
            user_enabled: true,
            machine_enabled: false,
        };
        assert_eq!(machine_off.flag_value(), 2);
    }

    #[test]
    /// 标志字编解码可往返。
    fn options_flag_roundtrip() {
        for flag in 0..4u32 {
            assert_eq!(GpoOptions::from_flag(flag).flag_value(), flag);
        }
    }

    #[test]
    /// 打开设置默认加载注册表信息（标志字 1），只读叠加 0x2。
    fn open_settings_flag_encoding() {
        assert_eq!(GpoOpenSettings::default().flag_value(), 1);
        let read_only = GpoOpenSettings {
            load_registry_information: true,
            read_only: true,
        };
        assert_eq!(read_only.flag_value(), 3);
        let bare = GpoOpenSettings {
            load_registry_information: false,
            read_only: false,
        };
        assert_eq!(bare.flag_value(), 0);
    }
}
