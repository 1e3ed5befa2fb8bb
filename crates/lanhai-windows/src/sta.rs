//! STA 线程封送：在单线程单元上执行一段操作。
//!
//! 实现方式：
//! - 每次调用启动一个专用工作线程，初始化为 COINIT_APARTMENTTHREADED，
//!   执行完毕后 join 并在调用线程上返回结果
//! - 操作返回的错误原样传回；工作线程 panic 会在调用线程上继续抛出
//!
//! 约束：
//! - 同步阻塞，不支持取消与超时；并发调用各自使用独立的工作线程
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};

use crate::error::{PolicyError, PolicyResult};

/// 在专用 STA 线程上执行 `operation` 并同步等待其完成。
///
/// 参数：
/// - `operation`：需要在 STA 上执行的操作（可借用调用方栈上的数据）
///
/// 返回值：
/// - 操作自身的返回值
///
/// 异常处理：
/// - 工作线程创建失败：[`PolicyError::WorkerSpawn`]
/// - 工作线程 COM 初始化失败：[`PolicyError::ApartmentInit`]
/// - 操作返回的错误原样传回；panic 通过 `resume_unwind` 在调用线程上重放
pub fn run_on_sta<T, F>(operation: F) -> PolicyResult<T>
where
    F: FnOnce() -> PolicyResult<T> + Send,
    T: Send,
{
    std::thread::scope(|scope| {
        let worker = std::thread::Builder::new()
            .name("lanhai-gpo-sta".to_string())
            .spawn_scoped(scope, move || {
                let _apartment = StaApartmentGuard::enter()?;
                operation()
            });
        let worker = match worker {
            Ok(worker) => worker,
            Err(source) => return Err(PolicyError::WorkerSpawn { source }),
        };
        match worker.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })
}

/// STA 单元守卫：离开作用域时自动调用 `CoUninitialize`。
struct StaApartmentGuard;

impl StaApartmentGuard {
    /// 将当前线程初始化为单线程单元。
    ///
    /// 异常处理：
    /// - 初始化失败返回 [`PolicyError::ApartmentInit`]；工作线程是新建的，
    ///   不会出现与既有单元类型冲突的情况
    fn enter() -> PolicyResult<Self> {
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }
            .ok()
            .map_err(|source| PolicyError::ApartmentInit { source })?;
        Ok(Self)
    }
}

impl Drop for StaApartmentGuard {
    /// 与 [`CoInitializeEx`] 成对，释放本线程的 COM 单元。
    fn drop(&mut self) {
        unsafe { CoUninitialize() }
    }
}
