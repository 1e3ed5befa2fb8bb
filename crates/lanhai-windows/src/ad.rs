//! Active Directory 承载的 GPO。
//!
//! 说明：
//! - AD GPO 以目录服务路径（LDAP 形如 `LDAP://CN={...},CN=Policies,...`）定位，
//!   唯一名按约定是 GUID 文本
//! - 与计算机 GPO 一样，直接构造要求调用线程已处于 STA
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

use uuid::Uuid;
use windows::core::PCWSTR;

use lanhai_core::options::GpoOpenSettings;
use lanhai_core::section::GroupPolicySection;

use crate::com;
use crate::error::{PolicyError, PolicyResult};
use crate::gpo::{GpoHandle, GroupPolicyObject};

/// AD 承载的 GPO。
pub struct ActiveDirectoryGroupPolicyObject {
    handle: GpoHandle,
}

impl ActiveDirectoryGroupPolicyObject {
    /// 在 Active Directory 中新建一个 GPO。
    ///
    /// 参数：
    /// - `active_directory_path`：GPO 所属容器的目录服务路径
    /// - `display_name`：新 GPO 的显示名
    /// - `settings`：打开设置
    /// - `owner`：所有者标识
    ///
    /// 异常处理：
    /// - 原生创建调用失败时返回错误（权限不足、路径不存在等）
    pub fn create(
        active_directory_path: &str,
        display_name: &str,
        settings: &GpoOpenSettings,
        owner: Option<Uuid>,
    ) -> PolicyResult<Self> {
        let instance = com::create_instance()?;
        let path_wide = com::to_wide(active_directory_path);
        let name_wide = com::to_wide(display_name);
        unsafe {
            instance.New(
                PCWSTR(path_wide.as_ptr()),
                PCWSTR(name_wide.as_ptr()),
                settings.flag_value(),
            )
        }
        .map_err(|e| {
            PolicyError::native(
                format!("在 Active Directory 创建 GPO 失败: {active_directory_path} ({display_name})"),
                e,
            )
        })?;
        Ok(Self {
            handle: GpoHandle::new(instance, owner),
        })
    }

    /// 打开一个已存在的 AD GPO。
    ///
    /// 参数：
    /// - `active_directory_path`：GPO 的目录服务路径
    /// - `settings`：打开设置
    /// - `owner`：所有者标识
    pub fn open(
        active_directory_path: &str,
        settings: &GpoOpenSettings,
        owner: Option<Uuid>,
    ) -> PolicyResult<Self> {
        let instance = com::create_instance()?;
        let wide = com::to_wide(active_directory_path);
        unsafe { instance.OpenDSGPO(PCWSTR(wide.as_ptr()), settings.flag_value()) }.map_err(
            |e| {
                PolicyError::native(
                    format!("打开 Active Directory GPO 失败: {active_directory_path}"),
                    e,
                )
            },
        )?;
        Ok(Self {
            handle: GpoHandle::new(instance, owner),
        })
    }

    /// 将唯一名解析为 GUID（AD GPO 按约定以 GUID 命名）。
    ///
    /// 异常处理：
    /// - 唯一名不是合法 GUID 文本时返回 [`PolicyError::InvalidGuidName`]
    pub fn guid_name(&self) -> PolicyResult<Uuid> {
        let name = self.handle.unique_name()?;
        Uuid::parse_str(&name).map_err(|source| PolicyError::InvalidGuidName { name, source })
    }
}

impl GroupPolicyObject for ActiveDirectoryGroupPolicyObject {
    fn handle(&self) -> &GpoHandle {
        &self.handle
    }

    fn handle_mut(&mut self) -> &mut GpoHandle {
        &mut self.handle
    }

    /// AD GPO 的节路径取自目录服务。
    fn registry_key_path_to(&self, section: GroupPolicySection) -> PolicyResult<String> {
        self.handle.ds_path(section)
    }
}
