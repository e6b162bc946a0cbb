// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only projections over the employee roster.
//!
//! Every function here is a pure function of its inputs, so callers may
//! throttle how often they run (e.g. debounce search input) without any
//! change in results.

use crate::types::{Employee, EmployeeStatus, Gender};
use std::collections::HashSet;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterSummary {
    /// Number of employees in the roster.
    pub total: usize,
    /// Employees with status `Active`.
    pub active: usize,
    /// Employees with status `Resigned`.
    pub resigned: usize,
    /// Sum of salaries of every employee that has not resigned.
    pub total_salary: u64,
}

/// Computes the headline numbers.
#[must_use]
pub fn summarize(roster: &[Employee]) -> RosterSummary {
    roster
        .iter()
        .fold(RosterSummary::default(), |mut summary, employee| {
            summary.total += 1;
            match employee.status {
                EmployeeStatus::Active => summary.active += 1,
                EmployeeStatus::Resigned => summary.resigned += 1,
                EmployeeStatus::Probation | EmployeeStatus::OnLeave => {}
            }
            if employee.status != EmployeeStatus::Resigned {
                summary.total_salary = summary.total_salary.saturating_add(employee.salary);
            }
            summary
        })
}

/// A group key with the number of employees in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount<K> {
    /// The group key.
    pub key: K,
    /// Number of employees in the group.
    pub count: usize,
}

fn count_working_by<K: PartialEq>(
    roster: &[Employee],
    key_of: impl Fn(&Employee) -> K,
) -> Vec<GroupCount<K>> {
    let mut groups: Vec<GroupCount<K>> = Vec::new();
    for employee in roster.iter().filter(|e| e.status != EmployeeStatus::Resigned) {
        let key: K = key_of(employee);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.count += 1,
            None => groups.push(GroupCount { key, count: 1 }),
        }
    }
    groups
}

/// Counts non-resigned employees per department, in order of first appearance.
#[must_use]
pub fn count_by_department(roster: &[Employee]) -> Vec<GroupCount<String>> {
    count_working_by(roster, |e| e.department.clone())
}

/// Counts non-resigned employees per gender, in order of first appearance.
#[must_use]
pub fn count_by_gender(roster: &[Employee]) -> Vec<GroupCount<Gender>> {
    count_working_by(roster, |e| e.gender)
}

/// Optional list filters, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    /// Free text matched against name, employee code (both
    /// case-insensitive) and phone.
    pub search: Option<String>,
    /// Exact department name.
    pub department: Option<String>,
    /// Exact status.
    pub status: Option<EmployeeStatus>,
}

impl RosterFilter {
    /// Returns true if `employee` passes every active filter.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        let matches_search: bool = self.search.as_deref().is_none_or(|term| {
            let needle: String = term.to_lowercase();
            employee.full_name.to_lowercase().contains(&needle)
                || employee.employee_code.to_lowercase().contains(&needle)
                || employee.phone.contains(term)
        });
        let matches_department: bool = self
            .department
            .as_deref()
            .is_none_or(|department| employee.department == department);
        let matches_status: bool = self.status.is_none_or(|status| employee.status == status);
        matches_search && matches_department && matches_status
    }
}

/// Returns the employees passing `filter`, in roster order.
#[must_use]
pub fn filter_roster<'a>(roster: &'a [Employee], filter: &RosterFilter) -> Vec<&'a Employee> {
    roster.iter().filter(|e| filter.matches(e)).collect()
}

/// Statuses offered in the status filter.
///
/// Without a department every status is offered. With a department only
/// the statuses present among that department's employees are offered,
/// in canonical order.
#[must_use]
pub fn available_statuses(roster: &[Employee], department: Option<&str>) -> Vec<EmployeeStatus> {
    let Some(department) = department else {
        return EmployeeStatus::ALL.to_vec();
    };
    let present: HashSet<EmployeeStatus> = roster
        .iter()
        .filter(|e| e.department == department)
        .map(|e| e.status)
        .collect();
    EmployeeStatus::ALL
        .into_iter()
        .filter(|status| present.contains(status))
        .collect()
}

/// Which part of the roster the dashboard table shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardTab {
    /// Everyone who has not resigned.
    #[default]
    Working,
    /// Resigned employees only.
    Resigned,
}

/// Filters applied to the dashboard table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    /// Working or resigned employees.
    pub tab: DashboardTab,
    /// Exact department name.
    pub department: Option<String>,
    /// Exact position name.
    pub position: Option<String>,
    /// Exact status.
    pub status: Option<EmployeeStatus>,
}

/// Returns the employees shown in the dashboard table.
#[must_use]
pub fn dashboard_list<'a>(roster: &'a [Employee], filter: &DashboardFilter) -> Vec<&'a Employee> {
    roster
        .iter()
        .filter(|e| match filter.tab {
            DashboardTab::Working => e.status != EmployeeStatus::Resigned,
            DashboardTab::Resigned => e.status == EmployeeStatus::Resigned,
        })
        .filter(|e| filter.department.as_deref().is_none_or(|d| e.department == d))
        .filter(|e| filter.position.as_deref().is_none_or(|p| e.position == p))
        .filter(|e| filter.status.is_none_or(|s| e.status == s))
        .collect()
}
