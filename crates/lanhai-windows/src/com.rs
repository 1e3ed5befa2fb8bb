//! 组策略 COM 对象创建与宽字符串辅助。
//!
//! 说明：
//! - 组策略 COM 类要求调用线程处于单线程单元（STA）；创建失败时本模块会
//!   检查当前单元类型，将“单元不匹配”与其他原生失败区分开
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

use windows::core::GUID;
use windows::Win32::System::Com::{
    CoCreateInstance, CoGetApartmentType, APTTYPE, APTTYPEQUALIFIER, APTTYPE_MAINSTA, APTTYPE_STA,
    CLSCTX_INPROC_SERVER,
};
use windows::Win32::System::GroupPolicy::IGroupPolicyObject;

use crate::error::{PolicyError, PolicyResult};

/// 组策略 COM 类的 CLSID（gpedit.h：CLSID_GroupPolicyObject）。
const CLSID_GROUP_POLICY_OBJECT: GUID = GUID::from_u128(0xea502722_a23d_11d1_a7d3_0000f87571e3);

/// 创建一个组策略 COM 对象。
///
/// 返回值：
/// - 成功：`IGroupPolicyObject` 实例（由调用方独占持有）
///
/// 异常处理：
/// - 创建失败且当前线程不是 STA：返回
///   [`PolicyError::RequiresSingleThreadedApartment`]，便于调用方定位环境问题
/// - 其他创建失败：返回 [`PolicyError::Native`]
pub(crate) fn create_instance() -> PolicyResult<IGroupPolicyObject> {
    let result: windows::core::Result<IGroupPolicyObject> =
        unsafe { CoCreateInstance(&CLSID_GROUP_POLICY_OBJECT, None, CLSCTX_INPROC_SERVER) };
    match result {
        Ok(instance) => Ok(instance),
        Err(source) if !current_thread_is_sta() => {
            Err(PolicyError::RequiresSingleThreadedApartment { source })
        }
        Err(source) => Err(PolicyError::native("创建组策略 COM 对象失败", source)),
    }
}

/// 判断当前线程是否处于单线程单元（STA/主 STA）。
///
/// 返回值：
/// - COM 未初始化或查询失败时视为非 STA
fn current_thread_is_sta() -> bool {
    let mut kind = APTTYPE(0);
    let mut qualifier = APTTYPEQUALIFIER(0);
    match unsafe { CoGetApartmentType(&mut kind, &mut qualifier) } {
        Ok(()) => kind == APTTYPE_STA || kind == APTTYPE_MAINSTA,
        Err(_) => false,
    }
}

/// 将字符串编码为 UTF-16 并追加 NUL 结尾（COM 接口以宽字符串接收参数）。
pub(crate) fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// 从固定容量的 UTF-16 输出缓冲区中取出字符串（截断到第一个 NUL）。
pub(crate) fn from_wide(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// 宽字符串编码带 NUL 结尾，解码在第一个 NUL 处截断。
    fn wide_string_roundtrip() {
        let wide = to_wide("abc");
        assert_eq!(wide.last(), Some(&0));
        assert_eq!(from_wide(&wide), "abc");

        let padded = [0x61u16, 0x62, 0, 0x63, 0];
        assert_eq!(from_wide(&padded), "ab");
    }
}
