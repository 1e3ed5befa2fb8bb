//! 本机策略读写便捷入口（自动 STA 封送）。
//!
//! 使用方式：
//! - 每次调用打开一个短生命周期的本机 GPO，完成单次读/写/删后立即释放，
//!   不持有任何全局状态
//! - 全部入口都经 [`crate::sta::run_on_sta`] 在专用 STA 线程上执行并同步等待，
//!   可从任意线程（含 MTA）调用
//!
//! 权限要求：
//! - 写入/删除并保存本机组策略通常需要管理员权限
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

use std::io;

use uuid::Uuid;
use winreg::enums::{KEY_READ, KEY_WRITE};
use winreg::RegKey;

use lanhai_core::options::GpoOpenSettings;
use lanhai_core::section::GroupPolicySection;
use lanhai_core::value::{GroupPolicyValue, PolicyValue};

use crate::error::{PolicyError, PolicyResult};
use crate::gpo::GroupPolicyObject;
use crate::machine::ComputerGroupPolicyObject;
use crate::registry;
use crate::sta;

/// 读取一条本机策略设置（含定位信息）。
///
/// 参数：
/// - `section`：目标节
/// - `registry_key_path`：节根键下的子键路径
/// - `registry_value_name`：值名
/// - `owner`：所有者标识；`None` 时使用组件默认值
///
/// 返回值：
/// - 子键或值不存在时，`value` 为 [`PolicyValue::None`]
pub fn get_policy_setting(
    section: GroupPolicySection,
    registry_key_path: &str,
    registry_value_name: &str,
    owner: Option<Uuid>,
) -> PolicyResult<GroupPolicyValue> {
    sta::run_on_sta(|| {
        get_policy_setting_on_sta(section, registry_key_path, registry_value_name, owner)
    })
}

/// 读取一条本机策略设置，只返回值本身。
pub fn get_policy_value(
    section: GroupPolicySection,
    registry_key_path: &str,
    registry_value_name: &str,
    owner: Option<Uuid>,
) -> PolicyResult<PolicyValue> {
    Ok(get_policy_setting(section, registry_key_path, registry_value_name, owner)?.value)
}

/// 写入一条本机策略设置并保存 GPO。
///
/// 参数：
/// - `new_value`：新值；[`PolicyValue::None`] 表示删除该值
///
/// 说明：
/// - 无论值是否发生变化都会执行保存，以推进 GPO 版本号使策略引擎感知变更
///
/// 异常处理：
/// - 打开 GPO、注册表操作或保存失败时返回错误；保存阶段计算机范围失败
///   会先于用户范围上报
pub fn set_policy_setting(
    section: GroupPolicySection,
    registry_key_path: &str,
    registry_value_name: &str,
    new_value: PolicyValue,
    owner: Option<Uuid>,
) -> PolicyResult<()> {
    sta::run_on_sta(|| {
        set_policy_setting_on_sta(
            section,
            registry_key_path,
            registry_value_name,
            &new_value,
            owner,
        )
    })
}

/// 删除一条本机策略设置并保存 GPO（值不存在时为幂等操作）。
pub fn delete_policy_setting(
    section: GroupPolicySection,
    registry_key_path: &str,
    registry_value_name: &str,
    owner: Option<Uuid>,
) -> PolicyResult<()> {
    set_policy_setting(
        section,
        registry_key_path,
        registry_value_name,
        PolicyValue::None,
        owner,
    )
}

/// 读取的 STA 侧实现：打开本机 GPO → 节根键 → 子键 → 取值。
fn get_policy_setting_on_sta(
    section: GroupPolicySection,
    registry_key_path: &str,
    registry_value_name: &str,
    owner: Option<Uuid>,
) -> PolicyResult<GroupPolicyValue> {
    let gpo = ComputerGroupPolicyObject::open_local(&GpoOpenSettings::default(), owner)?;
    let root = gpo.root_registry_key(section)?;
    let value = match open_subkey_if_present(&root, registry_key_path)? {
        Some(subkey) => registry::read_value(&subkey, registry_value_name)?,
        None => PolicyValue::None,
    };
    tracing::debug!(
        section = section.name(),
        key = registry_key_path,
        value_name = registry_value_name,
        kind = value.kind_name(),
        "读取策略值"
    );
    Ok(GroupPolicyValue {
        section,
        registry_key_path: registry_key_path.to_string(),
        registry_value_name: registry_value_name.to_string(),
        value,
    })
}

/// 写入/删除的 STA 侧实现：打开本机 GPO → 节根键 → 子键操作 → 保存。
fn set_policy_setting_on_sta(
    section: GroupPolicySection,
    registry_key_path: &str,
    registry_value_name: &str,
    new_value: &PolicyValue,
    owner: Option<Uuid>,
) -> PolicyResult<()> {
    let gpo = ComputerGroupPolicyObject::open_local(&GpoOpenSettings::default(), owner)?;
    {
        let root = gpo.root_registry_key(section)?;
        if new_value.is_none() {
            // 删除语义：不创建子键，子键不存在即视为已删除。
            if let Some(subkey) = open_subkey_if_present(&root, registry_key_path)? {
                registry::delete_value_if_present(&subkey, registry_value_name)?;
            }
        } else {
            let (subkey, _disposition) = root.create_subkey(registry_key_path).map_err(|e| {
                PolicyError::registry(format!("创建注册表子键失败: {registry_key_path}"), e)
            })?;
            registry::write_value(&subkey, registry_value_name, new_value)?;
        }
    }
    tracing::debug!(
        section = section.name(),
        key = registry_key_path,
        value_name = registry_value_name,
        kind = new_value.kind_name(),
        "写入策略值并保存"
    );
    gpo.save()
}

/// 以读写权限打开子键；子键不存在时返回 `None`。
fn open_subkey_if_present(root: &RegKey, key_path: &str) -> PolicyResult<Option<RegKey>> {
    match root.open_subkey_with_flags(key_path, KEY_READ | KEY_WRITE) {
        Ok(key) => Ok(Some(key)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PolicyError::registry(
            format!("打开注册表子键失败: {key_path}"),
            e,
        )),
    }
}
