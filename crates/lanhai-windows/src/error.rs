//! 错误类型：把原生返回码翻译为带上下文的领域错误。
//!
//! 约定：
//! - 原生调用失败统一包装为 [`PolicyError::Native`]，错误信息携带操作描述
//!   （含参数）与十六进制 HRESULT；系统自带的错误文本作为 source 保留
//! - 任何失败都不重试，直接向调用方传播
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

use thiserror::Error;

/// 本库统一的结果别名。
pub type PolicyResult<T> = Result<T, PolicyError>;

/// 组策略操作错误。
#[derive(Debug, Error)]
pub enum PolicyError {
    /// 原生 COM 调用返回非零结果码。
    #[error("组策略原生调用失败: {operation} (HRESULT=0x{code:08X})")]
    Native {
        /// 失败操作的描述（含关键参数）。
        operation: String,
        /// 原生返回码（HRESULT）。
        code: u32,
        #[source]
        source: windows::core::Error,
    },

    /// 当前线程不是单线程单元（STA），无法创建组策略 COM 对象。
    ///
    /// 处理建议：
    /// - 改用 [`crate::sta::run_on_sta`]，或在调用前把线程初始化为 STA
    #[error("需要单线程单元（STA）：当前线程的 COM 单元类型无法创建组策略对象")]
    RequiresSingleThreadedApartment {
        #[source]
        source: windows::core::Error,
    },

    /// STA 工作线程上的 COM 单元初始化失败。
    #[error("COM 单元初始化失败")]
    ApartmentInit {
        #[source]
        source: windows::core::Error,
    },

    /// STA 工作线程创建失败。
    #[error("STA 工作线程创建失败")]
    WorkerSpawn {
        #[source]
        source: std::io::Error,
    },

    /// GPO 已被删除，句柄不再可用。
    #[error("组策略对象已删除，句柄不再可用")]
    HandleInvalidated,

    /// 注册表操作失败。
    #[error("注册表操作失败: {operation}")]
    Registry {
        /// 失败操作的描述（含键路径/值名）。
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// 注册表值的原始字节无法按声明类型解码。
    #[error("注册表值解码失败: {reason}")]
    ValueDecode {
        /// 解码失败原因。
        reason: String,
    },

    /// AD GPO 的唯一名不是合法 GUID。
    #[error("组策略唯一名不是合法 GUID: {name}")]
    InvalidGuidName {
        /// 原始唯一名。
        name: String,
        #[source]
        source: uuid::Error,
    },
}

impl PolicyError {
    /// 包装一次失败的原生调用。
    ///
    /// 参数：
    /// - `operation`：操作描述（含关键参数，用于错误信息与排障）
    /// - `source`：windows crate 返回的错误（携带系统错误文本）
    pub(crate) fn native(operation: impl Into<String>, source: windows::core::Error) -> Self {
        let code = source.code().0 as u32;
        Self::Native {
            operation: operation.into(),
            code,
            source,
        }
    }

    /// 包装一次失败的注册表操作。
    pub(crate) fn registry(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Registry {
            operation: operation.into(),
            source,
        }
    }
}
