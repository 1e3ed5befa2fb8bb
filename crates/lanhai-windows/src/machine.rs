//! 本机/远程计算机 GPO。
//!
//! 说明：
//! - 直接构造（`open_local`/`open_remote`）要求调用线程已处于 STA；
//!   从任意线程使用请改走 [`crate::policy`] 的便捷入口或
//!   [`crate::sta::run_on_sta`]
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

/// 计算机 GPO（本机或远程机器）。
pub struct ComputerGroupPolicyObject {
    handle: GpoHandle,
    is_local: bool,
}

impl ComputerGroupPolicyObject {
    /// 打开本机 GPO。
    ///
    /// 参数：
    /// - `settings`：打开设置（默认加载注册表信息、可写）
    /// - `owner`：所有者标识；`None` 时使用组件默认值
    ///
    /// 异常处理：
    /// - COM 对象创建失败或原生打开调用失败时返回错误
    pub fn open_local(settings: &GpoOpenSettings, owner: Option<Uuid>) -> PolicyResult<Self> {
        let instance = com::create_instance()?;
        unsafe { instance.OpenLocalMachineGPO(settings.flag_value()) }
            .map_err(|e| PolicyError::native("打开本机组策略对象失败", e))?;
        Ok(Self {
            handle: GpoHandle::new(instance, owner),
            is_local: true,
        })
    }

    /// 打开远程计算机的 GPO。
    ///
    /// 参数：
    /// - `computer_name`：目标计算机名
    /// - `settings`：打开设置
    /// - `owner`：所有者标识
    ///
    /// 异常处理：
    /// - 目标不可达/无权限等失败由原生调用上报，包装后返回；
    ///   阻塞时长受原生超时控制，本库不额外加超时
    pub fn open_remote(
        computer_name: &str,
        settings: &GpoOpenSettings,
        owner: Option<Uuid>,
    ) -> PolicyResult<Self> {
        let instance = com::create_instance()?;
        let wide = com::to_wide(computer_name);
        unsafe { instance.OpenRemoteMachineGPO(PCWSTR(wide.as_ptr()), settings.flag_value()) }
            .map_err(|e| {
                PolicyError::native(format!("打开远程计算机组策略对象失败: {computer_name}"), e)
            })?;
        Ok(Self {
            handle: GpoHandle::new(instance, owner),
            is_local: false,
        })
    }

    /// 是否为本机 GPO。
    pub fn is_local(&self) -> bool {
        self.is_local
    }

    /// 目标计算机名（即 GPO 唯一名）。
    pub fn computer_name(&self) -> PolicyResult<String> {
        self.handle.unique_name()
    }
}

impl GroupPolicyObject for ComputerGroupPolicyObject {
    fn handle(&self) -> &GpoHandle {
        &self.handle
    }

    fn handle_mut(&mut self) -> &mut GpoHandle {
        &mut self.handle
    }

    /// 计算机 GPO 的节路径取自文件系统（SYSVOL/本地策略目录）。
    fn registry_key_path_to(&self, section: GroupPolicySection) -> PolicyResult<String> {
        self.handle.file_sys_path(section)
    }
}
