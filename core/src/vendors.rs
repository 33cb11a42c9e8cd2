use std::sync::OnceLock;

use airgauge_common::vendors::VendorRepository;
use mac_oui::Oui;
use pnet::util::MacAddr;
use tracing::warn;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Loads the embedded **Organizationally unique identifier** database once.
fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!("failed to load OUI database: {e:?}");
                None
            }
        })
        .as_ref()
}

pub struct MacOuiRepo;

impl VendorRepository for MacOuiRepo {
    fn get_vendor(&self, hardware_address: &str) -> Option<String> {
        let mac: MacAddr = hardware_address.parse().ok()?;
        let db = get_oui_db()?;
        match db.lookup_by_mac(&mac.to_string()) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            _ => None,
        }
    }
}
