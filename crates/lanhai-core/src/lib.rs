//! 蓝海组策略组件核心库（跨平台/业务无关）。
//!
//! 功能：
//! - 定义组策略节（Root/User/Machine）与原生节常量的映射
//! - 定义 GPO 启用选项与打开设置的位标志编码
//! - 定义策略值模型（自带类型判别的标签联合，`None` 表示“缺失/删除”）
//!
//! 约定：
//! - 本库不依赖任何 Windows API；所有系统交互由 lanhai-windows 完成
//! - 模型类型均派生 serde，便于落盘与 IPC 传输
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

pub mod options;
pub mod section;
pub mod value;
