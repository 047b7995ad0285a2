//! Códigos de región aceptados por el desplegador.

/// Regiones soportadas, en minúsculas y sin espacios.
pub const SUPPORTED_LOCATIONS: &[&str] = &["australiaeast",
                                           "australiasoutheast",
                                           "brazilsouth",
                                           "canadacentral",
                                           "canadaeast",
                                           "centralindia",
                                           "centralus",
                                           "eastasia",
                                           "eastus",
                                           "eastus2",
                                           "japaneast",
                                           "japanwest",
                                           "koreacentral",
                                           "koreasouth",
                                           "northcentralus",
                                           "northeurope",
                                           "southcentralus",
                                           "southeastasia",
                                           "southindia",
                                           "uksouth",
                                           "ukwest",
                                           "westcentralus",
                                           "westeurope",
                                           "westindia",
                                           "westus",
                                           "westus2"];

/// Coincidencia exacta contra `SUPPORTED_LOCATIONS`.
pub fn is_valid_location(location: &str) -> bool {
    SUPPORTED_LOCATIONS.contains(&location)
}
