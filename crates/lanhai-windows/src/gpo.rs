//! GPO 句柄封装与公共操作集合。
//!
//! 说明：
//! - [`GpoHandle`] 独占一个原生组策略 COM 对象；删除后句柄失效，
//!   后续调用统一返回 [`PolicyError::HandleInvalidated`]
//! - 字符串访问器使用固定 1024 个 UTF-16 码元的输出缓冲区（原生约定，
//!   不外泄到模型类型）
//! - [`GroupPolicyObject`] trait 是计算机/AD 两种承载形式的公共外观，
//!   各实现只需提供句柄与“节→路径”的原生取值方式
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

use uuid::Uuid;
use windows::core::{GUID, PCWSTR};
use windows::Win32::Foundation::BOOL;
use windows::Win32::System::GroupPolicy::IGroupPolicyObject;
use winreg::RegKey;

use lanhai_core::options::GpoOptions;
use lanhai_core::section::GroupPolicySection;

use crate::com;
use crate::error::{PolicyError, PolicyResult};

/// 本组件默认的所有者标识（保存 GPO 时写入修改来源）。
///
/// 说明：
/// - 调用方可在打开 GPO 时传入自己的标识覆盖该默认值
pub const DEFAULT_OWNER: Uuid = uuid::uuid!("7c3f2b7e-5b1d-4a64-9c3e-2f8d14a0c6b1");

/// 注册表扩展（CSE）的 GUID，保存注册表类设置时必须携带
/// （gpedit.h：REGISTRY_EXTENSION_GUID）。
const REGISTRY_EXTENSION: GUID = GUID::from_u128(0x35378eac_683f_11d2_a89a_00c04fbbcfa2);

/// 原生字符串访问器的固定缓冲区容量（UTF-16 码元数）。
const WIDE_BUFFER_LEN: usize = 1024;

/// 组策略对象句柄：独占一个原生 COM 实例与所有者标识。
pub struct GpoHandle {
    instance: Option<IGroupPolicyObject>,
    owner: Uuid,
}

impl GpoHandle {
    /// 包装一个已打开的原生实例。
    ///
    /// 参数：
    /// - `instance`：原生组策略 COM 对象
    /// - `owner`：所有者标识；`None` 时使用 [`DEFAULT_OWNER`]
    pub(crate) fn new(instance: IGroupPolicyObject, owner: Option<Uuid>) -> Self {
        Self {
            instance: Some(instance),
            owner: owner.unwrap_or(DEFAULT_OWNER),
        }
    }

    /// 所有者标识（保存时写入 GPO 的修改来源）。
    pub fn owner(&self) -> Uuid {
        self.owner
    }

    /// 取底层实例；句柄已失效时返回 [`PolicyError::HandleInvalidated`]。
    fn instance(&self) -> PolicyResult<&IGroupPolicyObject> {
        self.instance.as_ref().ok_or(PolicyError::HandleInvalidated)
    }

    /// 通过固定容量缓冲区读取一个原生字符串属性。
    ///
    /// 参数：
    /// - `operation`：失败时的操作描述
    /// - `read`：具体的原生读取调用
    fn read_wide(
        &self,
        operation: impl Into<String>,
        read: impl FnOnce(&IGroupPolicyObject, &mut [u16]) -> windows::core::Result<()>,
    ) -> PolicyResult<String> {
        let instance = self.instance()?;
        let mut buffer = vec![0u16; WIDE_BUFFER_LEN];
        read(instance, &mut buffer).map_err(|e| PolicyError::native(operation, e))?;
        Ok(com::from_wide(&buffer))
    }

    /// GPO 的存储路径（本机为文件系统路径，AD 为目录服务路径）。
    pub fn path(&self) -> PolicyResult<String> {
        self.read_wide("读取 GPO 路径失败", |i, buf| unsafe { i.GetPath(buf) })
    }

    /// GPO 的唯一名（本机 GPO 为计算机名，AD GPO 为 GUID 文本）。
    pub fn unique_name(&self) -> PolicyResult<String> {
        self.read_wide("读取 GPO 唯一名失败", |i, buf| unsafe { i.GetName(buf) })
    }

    /// GPO 的显示名。
    pub fn display_name(&self) -> PolicyResult<String> {
        self.read_wide("读取 GPO 显示名失败", |i, buf| unsafe {
            i.GetDisplayName(buf)
        })
    }

    /// 设置 GPO 的显示名。
    pub fn set_display_name(&self, name: &str) -> PolicyResult<()> {
        let instance = self.instance()?;
        let wide = com::to_wide(name);
        unsafe { instance.SetDisplayName(PCWSTR(wide.as_ptr())) }
            .map_err(|e| PolicyError::native(format!("设置 GPO 显示名失败: {name}"), e))
    }

    /// 读取启用选项（用户/计算机两部分是否生效）。
    pub fn options(&self) -> PolicyResult<GpoOptions> {
        let flag = unsafe { self.instance()?.GetOptions() }
            .map_err(|e| PolicyError::native("读取 GPO 启用选项失败", e))?;
        Ok(GpoOptions::from_flag(flag))
    }

    /// 写入启用选项；掩码固定为 [`GpoOptions::MASK`]，两个位都参与写入。
    pub fn set_options(&self, options: GpoOptions) -> PolicyResult<()> {
        unsafe { self.instance()?.SetOptions(options.flag_value(), GpoOptions::MASK) }
            .map_err(|e| PolicyError::native("设置 GPO 启用选项失败", e))
    }

    /// 保存 GPO：先计算机范围、后用户范围，各自独立上报失败。
    ///
    /// 异常处理：
    /// - 计算机范围保存失败会立即返回，不再尝试用户范围；
    ///   此时 GPO 处于“半保存”状态，由调用方决定是否重试
    pub fn save(&self) -> PolicyResult<()> {
        let instance = self.instance()?;
        let app = GUID::from_u128(self.owner.as_u128());
        unsafe { instance.Save(BOOL::from(true), BOOL::from(true), &REGISTRY_EXTENSION, &app) }
            .map_err(|e| PolicyError::native("保存 GPO 计算机范围设置失败", e))?;
        unsafe { instance.Save(BOOL::from(false), BOOL::from(true), &REGISTRY_EXTENSION, &app) }
            .map_err(|e| PolicyError::native("保存 GPO 用户范围设置失败", e))?;
        tracing::debug!(owner = %self.owner, "GPO 已保存");
        Ok(())
    }

    /// 删除 GPO 并使句柄失效。
    pub fn delete(&mut self) -> PolicyResult<()> {
        unsafe { self.instance()?.Delete() }
            .map_err(|e| PolicyError::native("删除 GPO 失败", e))?;
        // 删除后原生对象不可再用；清空实例，后续调用返回 HandleInvalidated。
        self.instance = None;
        Ok(())
    }

    /// 取指定节的根注册表键。
    ///
    /// 返回值：
    /// - 句柄所有权移交给返回的 [`RegKey`]，由其在析构时关闭
    pub fn root_registry_key(&self, section: GroupPolicySection) -> PolicyResult<RegKey> {
        let hkey = unsafe { self.instance()?.GetRegistryKey(section.native()) }.map_err(|e| {
            PolicyError::native(format!("获取 {} 节根注册表键失败", section.name()), e)
        })?;
        Ok(RegKey::predef(hkey.0 as winreg::HKEY))
    }

    /// 取指定节的文件系统路径（本机/远程计算机 GPO 使用）。
    pub fn file_sys_path(&self, section: GroupPolicySection) -> PolicyResult<String> {
        self.read_wide(
            format!("获取 {} 节文件系统路径失败", section.name()),
            |i, buf| unsafe { i.GetFileSysPath(section.native(), buf) },
        )
    }

    /// 取指定节的目录服务路径（AD GPO 使用）。
    pub fn ds_path(&self, section: GroupPolicySection) -> PolicyResult<String> {
        self.read_wide(
            format!("获取 {} 节目录服务路径失败", section.name()),
            |i, buf| unsafe { i.GetDSPath(section.native(), buf) },
        )
    }
}

/// GPO 的公共操作集合（计算机/AD 两种承载形式共享）。
pub trait GroupPolicyObject {
    /// 底层句柄（只读）。
    fn handle(&self) -> &GpoHandle;

    /// 底层句柄（可变，用于删除等使句柄失效的操作）。
    fn handle_mut(&mut self) -> &mut GpoHandle;

    /// 指定节对应的注册表键路径。
    ///
    /// 说明：
    /// - 计算机 GPO 返回文件系统路径，AD GPO 返回目录服务路径
    fn registry_key_path_to(&self, section: GroupPolicySection) -> PolicyResult<String>;

    /// GPO 的存储路径。
    fn path(&self) -> PolicyResult<String> {
        self.handle().path()
    }

    /// GPO 的唯一名。
    fn unique_name(&self) -> PolicyResult<String> {
        self.handle().unique_name()
    }

    /// GPO 的显示名。
    fn display_name(&self) -> PolicyResult<String> {
        self.handle().display_name()
    }

    /// 设置 GPO 的显示名。
    fn set_display_name(&self, name: &str) -> PolicyResult<()> {
        self.handle().set_display_name(name)
    }

    /// 读取启用选项。
    fn options(&self) -> PolicyResult<GpoOptions> {
        self.handle().options()
    }

    /// 写入启用选项。
    fn set_options(&self, options: GpoOptions) -> PolicyResult<()> {
        self.handle().set_options(options)
    }

    /// 保存 GPO（计算机范围在前、用户范围在后）。
    fn save(&self) -> PolicyResult<()> {
        self.handle().save()
    }

    /// 删除 GPO 并使对象失效。
    fn delete(&mut self) -> PolicyResult<()> {
        self.handle_mut().delete()
    }

    /// 取指定节的根注册表键（所有权归返回值）。
    fn root_registry_key(&self, section: GroupPolicySection) -> PolicyResult<RegKey> {
        self.handle().root_registry_key(section)
    }
}
