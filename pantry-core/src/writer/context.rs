#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    #[default]
    None,
    SqlCreateTable,
    SqlCreateTablePrimaryKey,
    SqlDropTable,
    SqlInsertInto,
    SqlInsertIntoValues,
    SqlSelect,
    SqlSelectFrom,
    SqlSelectOrderBy,
    SqlReport,
    SqlReportDates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlContext {
    pub fragment: Fragment,
    pub qualify_columns: bool,
}

impl SqlContext {
    pub fn new(fragment: Fragment, qualify_columns: bool) -> Self {
        Self {
            fragment,
            qualify_columns,
        }
    }
    /// Same context in a different fragment.
    pub fn switch_fragment(&self, fragment: Fragment) -> Self {
        Self { fragment, ..*self }
    }
}

impl Default for SqlContext {
    fn default() -> Self {
        SqlContext::new(Fragment::None, true)
    }
}
