use crate::core::models::sid::Sid;
use crate::core::traits::identity::{IdentityProvider, SidLookup};

/// First guess for the SID buffer. The OS reports the real size when this
/// is short.
const INITIAL_SID_BUFFER: usize = 256;

/// Resolve the current user's SID for attribution on an emitted event.
///
/// Best-effort by contract: every failure path collapses to `None`, and
/// the caller emits without attribution. The size-correction dance with
/// the OS is bounded to a single retry — if the reported size is still
/// wrong on the second attempt, the OS is not going to converge and we
/// give up rather than loop.
pub fn resolve_current_user(identity: &dyn IdentityProvider) -> Option<Sid> {
    let account = identity.current_user_name()?;

    let mut buffer = vec![0u8; INITIAL_SID_BUFFER];
    let mut resized = false;
    loop {
        match identity.lookup_account_sid(&account, &mut buffer) {
            SidLookup::Found => {
                if identity.is_valid_sid(&buffer) {
                    return Some(Sid::from_bytes(buffer));
                }
                return None;
            }
            SidLookup::BufferTooSmall { required } if !resized => {
                buffer.clear();
                buffer.resize(required as usize, 0);
                resized = true;
            }
            SidLookup::BufferTooSmall { .. } | SidLookup::Failed => return None,
        }
    }
}
