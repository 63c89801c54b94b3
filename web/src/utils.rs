use gloo::storage::{LocalStorage, Storage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use yew::prelude::*;

/// LocalStorage key under which a value is kept. `Option<T>` shares the key
/// of `T`, a stored `null` meaning "no preference".
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

impl<T: StorageKey> StorageKey for Option<T> {
    const KEY: &'static str = T::KEY;
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + DeserializeOwned + Default,
{
    fn local_or_default() -> Self {
        LocalStorage::get(Self::KEY).unwrap_or_default()
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T> LocalSave for T
where
    T: StorageKey + Serialize,
{
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(Self::KEY, self) {
            log::error!("failed to save {}: {:?}", Self::KEY, err);
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attatch the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Formats a value for the three-digit nav counters, clamped to what fits.
pub(crate) fn format_for_counter(value: i32) -> String {
    let value = value.clamp(-99, 999);
    if value < 0 {
        format!("-{:02}", -value)
    } else {
        format!("{:03}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_pads_to_three_digits() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(7), "007");
        assert_eq!(format_for_counter(42), "042");
        assert_eq!(format_for_counter(123), "123");
    }

    #[test]
    fn counter_clamps_out_of_range_values() {
        assert_eq!(format_for_counter(1234), "999");
        assert_eq!(format_for_counter(-7), "-07");
        assert_eq!(format_for_counter(-1234), "-99");
    }
}
