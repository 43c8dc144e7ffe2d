use std::ptr;

use windows_sys::Win32::Foundation::ERROR_SUCCESS;
use windows_sys::Win32::System::Registry::{
    HKEY, HKEY_LOCAL_MACHINE, KEY_ALL_ACCESS, REG_DWORD, REG_EXPAND_SZ, REG_OPTION_NON_VOLATILE,
    RegCloseKey, RegCreateKeyExW, RegSetValueExW,
};

use super::wide::to_wide_null;
use crate::core::errors::{Result, SinkError};
use crate::core::traits::registry::{RegistryHive, RegistryKey};

/// The local-machine registry hive.
pub struct WinRegistry;

impl RegistryHive for WinRegistry {
    fn create_key(&self, path: &str) -> Result<Box<dyn RegistryKey>> {
        let path_w = to_wide_null(path);
        let mut key: HKEY = ptr::null_mut();
        let mut disposition = 0u32;
        // SAFETY: all pointers are valid for the duration of the call.
        let status = unsafe {
            RegCreateKeyExW(
                HKEY_LOCAL_MACHINE,
                path_w.as_ptr(),
                0,
                ptr::null(),
                REG_OPTION_NON_VOLATILE,
                KEY_ALL_ACCESS,
                ptr::null(),
                &mut key,
                &mut disposition,
            )
        };
        if status != ERROR_SUCCESS {
            return Err(SinkError::Configuration {
                detail: format!("cannot create registry key '{path}'"),
                code: status,
            });
        }
        Ok(Box::new(WinRegistryKey { key }))
    }
}

struct WinRegistryKey {
    key: HKEY,
}

impl WinRegistryKey {
    fn set_value(&self, name: &str, value_type: u32, data: &[u8]) -> Result<()> {
        let name_w = to_wide_null(name);
        // SAFETY: `data` is valid for `data.len()` bytes.
        let status = unsafe {
            RegSetValueExW(
                self.key,
                name_w.as_ptr(),
                0,
                value_type,
                data.as_ptr(),
                data.len() as u32,
            )
        };
        if status != ERROR_SUCCESS {
            return Err(SinkError::Configuration {
                detail: format!("cannot write registry value '{name}'"),
                code: status,
            });
        }
        Ok(())
    }
}

impl RegistryKey for WinRegistryKey {
    fn set_expand_string(&self, name: &str, value: &str) -> Result<()> {
        // The stored byte count includes the terminating NUL.
        let bytes: Vec<u8> = to_wide_null(value)
            .into_iter()
            .flat_map(u16::to_le_bytes)
            .collect();
        self.set_value(name, REG_EXPAND_SZ, &bytes)
    }

    fn set_dword(&self, name: &str, value: u32) -> Result<()> {
        self.set_value(name, REG_DWORD, &value.to_le_bytes())
    }
}

impl Drop for WinRegistryKey {
    fn drop(&mut self) {
        unsafe {
            RegCloseKey(self.key);
        }
    }
}
