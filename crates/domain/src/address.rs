// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Address field cascade for employee records.
//!
//! Records refer to locations by name. Changing a higher level clears the
//! levels below it; at address level 2 the district follows the ward.

use crate::hierarchy::{find_by_id, find_by_name, list_children};
use crate::types::{AddressLevel, Employee, LocationItem};

/// A single edit to the address part of an employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressChange {
    /// A province was selected (by name).
    Province(String),
    /// A district was selected (by name).
    District(String),
    /// A ward was selected (by name).
    Ward(String),
    /// The address representation was switched.
    Level(AddressLevel),
}

/// Applies one address edit and returns the updated record.
///
/// - changing the province clears district and ward
/// - changing the district clears the ward
/// - at level 2, choosing a ward writes the ward's parent district name into
///   `district`; a ward that cannot be resolved leaves `district` unchanged
#[must_use]
pub fn apply_address_change(
    record: &Employee,
    change: AddressChange,
    districts: &[LocationItem],
    wards: &[LocationItem],
) -> Employee {
    let mut next: Employee = record.clone();
    match change {
        AddressChange::Province(name) => {
            next.province = name;
            next.district.clear();
            next.ward.clear();
        }
        AddressChange::District(name) => {
            next.district = name;
            next.ward.clear();
        }
        AddressChange::Ward(name) => {
            if next.address_level == AddressLevel::Two {
                if let Some(district) = parent_district_of(&name, districts, wards) {
                    next.district = district.name.clone();
                }
            }
            next.ward = name;
        }
        AddressChange::Level(level) => {
            next.address_level = level;
        }
    }
    next
}

/// Resolves the district a ward (given by name) belongs to.
#[must_use]
pub fn parent_district_of<'a>(
    ward_name: &str,
    districts: &'a [LocationItem],
    wards: &[LocationItem],
) -> Option<&'a LocationItem> {
    let ward: &LocationItem = find_by_name(wards, ward_name)?;
    let parent_id: &str = ward.parent_id.as_deref()?;
    find_by_id(districts, parent_id)
}

/// Districts selectable for the named province.
#[must_use]
pub fn available_districts<'a>(
    province_name: &str,
    provinces: &[LocationItem],
    districts: &'a [LocationItem],
) -> Vec<&'a LocationItem> {
    find_by_name(provinces, province_name).map_or_else(Vec::new, |province| {
        list_children(districts, Some(province.id.as_str()))
    })
}

/// Wards selectable for the record's current province/district.
///
/// At level 3 these are the wards of the selected district. At level 2 they
/// are the wards of every district of the selected province.
#[must_use]
pub fn available_wards<'a>(
    record: &Employee,
    provinces: &[LocationItem],
    districts: &[LocationItem],
    wards: &'a [LocationItem],
) -> Vec<&'a LocationItem> {
    match record.address_level {
        AddressLevel::Three => find_by_name(districts, &record.district)
            .map_or_else(Vec::new, |district| {
                list_children(wards, Some(district.id.as_str()))
            }),
        AddressLevel::Two => {
            let district_ids: Vec<&str> = available_districts(&record.province, provinces, districts)
                .into_iter()
                .map(|d| d.id.as_str())
                .collect();
            wards
                .iter()
                .filter(|w| {
                    w.parent_id
                        .as_deref()
                        .is_some_and(|parent| district_ids.contains(&parent))
                })
                .collect()
        }
    }
}
