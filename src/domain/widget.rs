//! Fixed widget catalogue: which endpoint feeds which display region

use std::fmt;
use std::str::FromStr;

use super::chart::ChartType;

/// What a widget's endpoint returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Chart(ChartType),
    Counts,
}

/// One dashboard widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetId {
    Employees,
    Gender,
    Department,
    EmployeeCount,
    Pipeline,
}

impl WidgetId {
    pub const ALL: [WidgetId; 5] = [
        WidgetId::Employees,
        WidgetId::Gender,
        WidgetId::Department,
        WidgetId::EmployeeCount,
        WidgetId::Pipeline,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            WidgetId::Employees => "/employee/dashboard-employee",
            WidgetId::Gender => "/employee/dashboard-employee-gender",
            WidgetId::Department => "/employee/dashboard-employee-department",
            WidgetId::EmployeeCount => "/employee/dashboard-employee-count",
            WidgetId::Pipeline => "/recruitment/dashboard-pipeline",
        }
    }

    /// Display region id; count widgets own several regions and use their tile group id
    pub fn region(&self) -> &'static str {
        match self {
            WidgetId::Employees => "totalEmployees",
            WidgetId::Gender => "genderChart",
            WidgetId::Department => "departmentChart",
            WidgetId::EmployeeCount => "employeeCounts",
            WidgetId::Pipeline => "recruitmentChart1",
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetId::Employees | WidgetId::Gender | WidgetId::Department => {
                WidgetKind::Chart(ChartType::Doughnut)
            }
            WidgetId::EmployeeCount => WidgetKind::Counts,
            WidgetId::Pipeline => WidgetKind::Chart(ChartType::Bar),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WidgetId::Employees => "Total Employees",
            WidgetId::Gender => "Gender Chart",
            WidgetId::Department => "Department Chart",
            WidgetId::EmployeeCount => "Employees",
            WidgetId::Pipeline => "Recruitment Pipeline",
        }
    }

    pub fn page(&self) -> Page {
        match self {
            WidgetId::Pipeline => Page::Recruitment,
            _ => Page::Employee,
        }
    }
}

/// A dashboard page and the widgets drawn on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Employee,
    Recruitment,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Employee, Page::Recruitment];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Employee => "Employee",
            Page::Recruitment => "Recruitment",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Page::Employee => '1',
            Page::Recruitment => '2',
        }
    }

    pub fn widgets(&self) -> Vec<WidgetId> {
        WidgetId::ALL
            .into_iter()
            .filter(|w| w.page() == *self)
            .collect()
    }

    /// Chart widgets in drawing order
    pub fn charts(&self) -> Vec<WidgetId> {
        self.widgets()
            .into_iter()
            .filter(|w| matches!(w.kind(), WidgetKind::Chart(_)))
            .collect()
    }

    /// The only chart on the page that responds to title clicks
    pub fn cyclable(&self) -> WidgetId {
        match self {
            Page::Employee => WidgetId::Employees,
            Page::Recruitment => WidgetId::Pipeline,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Page::Employee => Page::Recruitment,
            Page::Recruitment => Page::Employee,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employee" | "employees" => Ok(Page::Employee),
            "recruitment" => Ok(Page::Recruitment),
            other => Err(format!("unknown page '{other}' (expected employee or recruitment)")),
        }
    }
}
