/// Resolves device manufacturers from hardware addresses.
pub trait VendorRepository: Send + Sync {
    /// Returns the vendor for `hardware_address`, or `None` when the address
    /// does not parse or its OUI is unknown.
    fn get_vendor(&self, hardware_address: &str) -> Option<String>;
}
