use std::ffi::c_void;
use std::ptr;

use windows_sys::Win32::Foundation::{ERROR_INSUFFICIENT_BUFFER, GetLastError};
use windows_sys::Win32::Security::{GetLengthSid, IsValidSid, LookupAccountNameW, SID_NAME_USE};
use windows_sys::Win32::System::WindowsProgramming::GetUserNameW;

use super::wide::to_wide_null;
use crate::core::traits::identity::{IdentityProvider, SidLookup};

// UNLEN + 1 for the terminating NUL.
const USER_NAME_BUFFER: usize = 257;

// DNLEN is 15 in practice; 256 leaves the domain out-buffer far from the
// size-correction path.
const DOMAIN_NAME_BUFFER: usize = 256;

/// Identity lookup against the local security authority.
pub struct WinIdentity;

impl IdentityProvider for WinIdentity {
    fn current_user_name(&self) -> Option<String> {
        let mut name = [0u16; USER_NAME_BUFFER];
        let mut size = name.len() as u32;
        // SAFETY: `size` tracks the capacity of `name`.
        if unsafe { GetUserNameW(name.as_mut_ptr(), &mut size) } == 0 {
            return None;
        }
        // `size` counts the terminating NUL.
        let length = size.saturating_sub(1) as usize;
        Some(String::from_utf16_lossy(&name[..length]))
    }

    fn lookup_account_sid(&self, account: &str, buffer: &mut Vec<u8>) -> SidLookup {
        let account = to_wide_null(account);
        let mut sid_size = buffer.len() as u32;
        let mut domain = [0u16; DOMAIN_NAME_BUFFER];
        let mut domain_size = domain.len() as u32;
        let mut sid_use: SID_NAME_USE = 0;
        // SAFETY: each out-pointer is paired with the size passed for it.
        let ok = unsafe {
            LookupAccountNameW(
                ptr::null(),
                account.as_ptr(),
                buffer.as_mut_ptr() as *mut c_void,
                &mut sid_size,
                domain.as_mut_ptr(),
                &mut domain_size,
                &mut sid_use,
            )
        };
        if ok != 0 {
            // SAFETY: on success the buffer holds a SID.
            let length = unsafe { GetLengthSid(buffer.as_ptr() as *mut c_void) } as usize;
            buffer.truncate(length.min(buffer.len()));
            return SidLookup::Found;
        }
        if unsafe { GetLastError() } == ERROR_INSUFFICIENT_BUFFER {
            SidLookup::BufferTooSmall { required: sid_size }
        } else {
            SidLookup::Failed
        }
    }

    fn is_valid_sid(&self, sid: &[u8]) -> bool {
        // SAFETY: validity is exactly what the call checks; it reads only
        // within the claimed structure.
        !sid.is_empty() && unsafe { IsValidSid(sid.as_ptr() as *mut c_void) } != 0
    }
}
