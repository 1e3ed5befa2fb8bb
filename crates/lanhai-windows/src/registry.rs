//! 注册表值编解码与键内操作。
//!
//! 实现方式：
//! - 通过 winreg 的原始值接口（`RegValue`）读写，编解码由本模块完成：
//!   字符串按 UTF-16LE 带 NUL 结尾，REG_MULTI_SZ 以双 NUL 结束，
//!   整数按小端字节序
//! - 值名存在性检测按“枚举值名 + 忽略大小写比较”进行，与注册表自身的
//!   大小写不敏感规则一致
//!
//! 作者：蓝海组策略项目组（自动生成）
//! 创建时间：2026-08-06
//! 修改时间：2026-08-06

use std::io;

use winreg::enums::RegType;
use winreg::{RegKey, RegValue};

use lanhai_core::value::PolicyValue;

use crate::error::{PolicyError, PolicyResult};

/// 读取一个注册表值并解码为 [`PolicyValue`]。
///
/// 参数：
/// - `key`：目标键
/// - `value_name`：值名
///
/// 返回值：
/// - 值不存在时返回 [`PolicyValue::None`]
///
/// 异常处理：
/// - 读取失败（权限等）返回 [`PolicyError::Registry`]；
///   字节负载与声明类型不符返回 [`PolicyError::ValueDecode`]
pub fn read_value(key: &RegKey, value_name: &str) -> PolicyResult<PolicyValue> {
    match key.get_raw_value(value_name) {
        Ok(raw) => decode_value(&raw),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PolicyValue::None),
        Err(e) => Err(PolicyError::registry(
            format!("读取注册表值失败: {value_name}"),
            e,
        )),
    }
}

/// 写入一个 [`PolicyValue`]。
///
/// 参数：
/// - `key`：目标键
/// - `value_name`：值名
/// - `value`：待写入的值；[`PolicyValue::None`] 表示删除（若存在）
///
/// 异常处理：
/// - 写入/删除失败返回 [`PolicyError::Registry`]
pub fn write_value(key: &RegKey, value_name: &str, value: &PolicyValue) -> PolicyResult<()> {
    match encode_value(value) {
        Some(raw) => key.set_raw_value(value_name, &raw).map_err(|e| {
            PolicyError::registry(format!("写入注册表值失败: {value_name}"), e)
        }),
        None => {
            delete_value_if_present(key, value_name)?;
            Ok(())
        }
    }
}

/// 删除一个注册表值（若存在）。
///
/// 返回值：
/// - `Ok(true)`：值存在且已删除
/// - `Ok(false)`：值不存在（幂等）
pub fn delete_value_if_present(key: &RegKey, value_name: &str) -> PolicyResult<bool> {
    if !contains_value(key, value_name)? {
        return Ok(false);
    }
    key.delete_value(value_name)
        .map_err(|e| PolicyError::registry(format!("删除注册表值失败: {value_name}"), e))?;
    Ok(true)
}

/// 判断键下是否存在指定值名（忽略大小写）。
///
/// 异常处理：
/// - 枚举值名失败返回 [`PolicyError::Registry`]
pub fn contains_value(key: &RegKey, value_name: &str) -> PolicyResult<bool> {
    for item in key.enum_values() {
        let (name, _value) =
            item.map_err(|e| PolicyError::registry("枚举注册表值名失败", e))?;
        if name.eq_ignore_ascii_case(value_name) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// 将原始注册表值解码为 [`PolicyValue`]。
///
/// 异常处理：
/// - REG_DWORD/REG_QWORD 的字节长度异常时返回 [`PolicyError::ValueDecode`]
/// - 未识别的类型降级为 [`PolicyValue::Binary`]，不丢弃数据
fn decode_value(raw: &RegValue) -> PolicyResult<PolicyValue> {
    Ok(match raw.vtype {
        RegType::REG_DWORD => {
            let bytes: [u8; 4] = raw.bytes.as_slice().try_into().map_err(|_| {
                PolicyError::ValueDecode {
                    reason: format!("REG_DWORD 负载长度异常: {} 字节", raw.bytes.len()),
                }
            })?;
            PolicyValue::Dword(u32::from_le_bytes(bytes))
        }
        RegType::REG_QWORD => {
            let bytes: [u8; 8] = raw.bytes.as_slice().try_into().map_err(|_| {
                PolicyError::ValueDecode {
                    reason: format!("REG_QWORD 负载长度异常: {} 字节", raw.bytes.len()),
                }
            })?;
            PolicyValue::Qword(u64::from_le_bytes(bytes))
        }
        RegType::REG_SZ => PolicyValue::String(string_from_bytes(&raw.bytes)),
        RegType::REG_EXPAND_SZ => PolicyValue::ExpandString(string_from_bytes(&raw.bytes)),
        RegType::REG_MULTI_SZ => PolicyValue::MultiString(strings_from_bytes(&raw.bytes)),
        RegType::REG_BINARY => PolicyValue::Binary(raw.bytes.clone()),
        _ => PolicyValue::Binary(raw.bytes.clone()),
    })
}

/// 将 [`PolicyValue`] 编码为原始注册表值。
///
/// 返回值：
/// - [`PolicyValue::None`] 没有可写负载，返回 `None`（由调用方按删除处理）
fn encode_value(value: &PolicyValue) -> Option<RegValue> {
    let (vtype, bytes) = match value {
        PolicyValue::None => return None,
        PolicyValue::Dword(v) => (RegType::REG_DWORD, v.to_le_bytes().to_vec()),
        PolicyValue::Qword(v) => (RegType::REG_QWORD, v.to_le_bytes().to_vec()),
        PolicyValue::String(s) => (RegType::REG_SZ, string_to_bytes(s)),
        PolicyValue::ExpandString(s) => (RegType::REG_EXPAND_SZ, string_to_bytes(s)),
        PolicyValue::MultiString(v) => (RegType::REG_MULTI_SZ, strings_to_bytes(v)),
        PolicyValue::Binary(b) => (RegType::REG_BINARY, b.clone()),
    };
    Some(RegValue { bytes, vtype })
}

/// 将注册表字节负载视作 UTF-16LE 并解码，去掉结尾 NUL。
fn string_from_bytes(bytes: &[u8]) -> String {
    let units = utf16_units(bytes);
    String::from_utf16_lossy(&units)
        .trim_end_matches('\0')
        .to_string()
}

/// 解码 REG_MULTI_SZ：按 NUL 切分，忽略结尾的空段。
fn strings_from_bytes(bytes: &[u8]) -> Vec<String> {
    let units = utf16_units(bytes);
    units
        .split(|&c| c == 0)
        .filter(|part| !part.is_empty())
        .map(|part| String::from_utf16_lossy(part))
        .collect()
}

/// 编码字符串为 UTF-16LE 字节并带 NUL 结尾。
fn string_to_bytes(s: &str) -> Vec<u8> {
    s.encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(|unit| unit.to_le_bytes())
        .collect()
}

/// 编码 REG_MULTI_SZ：每项以 NUL 结尾，整体再补一个 NUL。
fn strings_to_bytes(strings: &[String]) -> Vec<u8> {
    let mut units: Vec<u16> = Vec::new();
    for s in strings {
        units.extend(s.encode_utf16());
        units.push(0);
    }
    if strings.is_empty() {
        units.push(0);
    }
    units.push(0);
    units.iter().flat_map(|unit| unit.to_le_bytes()).collect()
}

/// 将字节负载按小端序重组为 UTF-16 码元（奇数长度时丢弃尾字节）。
fn utf16_units(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// 各变体可经字节编解码往返。
    fn encode_decode_roundtrip() {
        let cases = [
            PolicyValue::Dword(0xDEAD_BEEF),
            PolicyValue::Qword(0x0123_4567_89AB_CDEF),
            PolicyValue::String("策略值".to_string()),
            PolicyValue::ExpandString("%SystemRoot%\\System32".to_string()),
            PolicyValue::MultiString(vec!["a".to_string(), "bb".to_string()]),
            PolicyValue::Binary(vec![0, 1, 2, 255]),
        ];
        for value in cases {
            let raw = encode_value(&value).expect("encode");
            assert_eq!(decode_value(&raw).expect("decode"), value);
        }
    }

    #[test]
    /// `None` 没有可写负载。
    fn none_has_no_payload() {
        assert!(encode_value(&PolicyValue::None).is_none());
    }

    #[test]
    /// REG_MULTI_SZ 以双 NUL 结束，空列表同样合法。
    fn multi_sz_terminators() {
        let bytes = strings_to_bytes(&["x".to_string()]);
        assert_eq!(bytes, vec![0x78, 0, 0, 0, 0, 0]);
        let empty = strings_to_bytes(&[]);
        assert_eq!(empty, vec![0, 0, 0, 0]);
        assert!(strings_from_bytes(&empty).is_empty());
    }

    #[test]
    /// DWORD 负载长度异常会报解码错误而不是骗出一个值。
    fn dword_bad_length_rejected() {
        let raw = RegValue {
            bytes: vec![1, 0],
            vtype: RegType::REG_DWORD,
        };
        assert!(matches!(
            decode_value(&raw),
            Err(PolicyError::ValueDecode { .. })
        ));
    }

    #[test]
    /// 未识别的注册表类型降级为 Binary。
    fn unknown_type_degrades_to_binary() {
        let raw = RegValue {
            bytes: vec![1, 2, 3],
            vtype: RegType::REG_LINK,
        };
        assert_eq!(
            decode_value(&raw).expect("decode"),
            PolicyValue::Binary(vec![1, 2, 3])
        );
    }
}
