//! Catálogo de planes del servicio.

use serde::Serialize;

pub const SERVICE_ID: &str = "b43b4bba-5741-4d98-a10b-17dc5cee0175";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub name: &'static str,
    pub tier: &'static str,
    /// Unidades de cómputo.
    pub capacity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlan {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub sku: Sku,
    pub storage_mb: u32,
}

pub const PLANS: &[ServicePlan] = &[ServicePlan { id: "b2ed210f-6a10-4593-a6c4-964e6b6fad62",
                                                   name: "basic50",
                                                   description: "Basic Tier, 50 DTUs",
                                                   sku: Sku { name: "PGSQLB50",
                                                              tier: "Basic",
                                                              capacity: 50 },
                                                   storage_mb: 51200 },
                                     ServicePlan { id: "843d7d03-9306-447e-8c19-25ccc4ac30d7",
                                                   name: "basic100",
                                                   description: "Basic Tier, 100 DTUs",
                                                   sku: Sku { name: "PGSQLB100",
                                                              tier: "Basic",
                                                              capacity: 100 },
                                                   storage_mb: 51200 },
                                     ServicePlan { id: "a2a9b7d1-6bb8-4d2b-9d7a-5c2c2b4b2c61",
                                                   name: "standard100",
                                                   description: "Standard Tier, 100 DTUs",
                                                   sku: Sku { name: "PGSQLS100",
                                                              tier: "Standard",
                                                              capacity: 100 },
                                                   storage_mb: 128000 },
                                     ServicePlan { id: "e6d3c9a2-4c2f-4a0e-8f1a-3b8f7c6d5e42",
                                                   name: "standard200",
                                                   description: "Standard Tier, 200 DTUs",
                                                   sku: Sku { name: "PGSQLS200",
                                                              tier: "Standard",
                                                              capacity: 200 },
                                                   storage_mb: 128000 }];

/// Busca un plan del servicio. `None` si el servicio o el plan no existen.
pub fn find_plan(service_id: &str, plan_id: &str) -> Option<&'static ServicePlan> {
    if service_id != SERVICE_ID {
        return None;
    }
    PLANS.iter().find(|p| p.id == plan_id)
}

/// Plan usado cuando el llamador no indica ninguno.
pub fn default_plan() -> &'static ServicePlan {
    &PLANS[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_ids_are_unique() {
        for (i, a) in PLANS.iter().enumerate() {
            assert!(PLANS[i + 1..].iter().all(|b| b.id != a.id && b.name != a.name));
        }
    }

    #[test]
    fn lookup_requires_matching_service() {
        let basic = &PLANS[0];
        assert_eq!(find_plan(SERVICE_ID, basic.id), Some(basic));
        assert_eq!(find_plan("other-service", basic.id), None);
        assert_eq!(find_plan(SERVICE_ID, "nope"), None);
    }
}
