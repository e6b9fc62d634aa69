use declmap_core::{ColumnDef, ColumnType, TableDef};

/// A lone `INTEGER` key is declared inline with `AUTOINCREMENT`, so
/// backend-assigned ids never go below the largest id ever stored.
fn is_autoincrement_key(table: &TableDef, column: &ColumnDef) -> bool {
    column.primary_key
        && column.column_type == ColumnType::Integer
        && table.columns.iter().filter(|c| c.primary_key).count() == 1
}

fn column_sql(table: &TableDef, column: &ColumnDef) -> String {
    let mut sql = format!("{} {}", column.name, column.column_type.sql_name());
    if !column.nullable {
        sql.push_str(" NOT NULL");
    }
    if is_autoincrement_key(table, column) {
        sql.push_str(" PRIMARY KEY AUTOINCREMENT");
    }
    sql
}

/// Generate the CREATE TABLE statement for a mapped table
pub fn create_table_sql(table: &TableDef) -> String {
    let mut parts: Vec<String> = table
        .columns
        .iter()
        .map(|c| column_sql(table, c))
        .collect();
    let keys: Vec<&str> = table
        .columns
        .iter()
        .filter(|c| c.primary_key && !is_autoincrement_key(table, c))
        .map(|c| c.name)
        .collect();
    if !keys.is_empty() {
        parts.push(format!("PRIMARY KEY ({})", keys.join(", ")));
    }
    format!("CREATE TABLE {} (\n\t{}\n)", table.name, parts.join(", \n\t"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use declmap_core::model::USERS_TABLE;

    #[test]
    fn test_users_ddl() {
        assert_eq!(
            create_table_sql(&USERS_TABLE),
            "CREATE TABLE users (\n\tid INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT, \n\tname TEXT, \n\tfullname TEXT, \n\tnickname TEXT\n)"
        );
    }

    #[test]
    fn test_composite_key_stays_table_level() {
        static PAIRS: TableDef = TableDef {
            name: "pairs",
            columns: &[ColumnDef::primary_key("a"), ColumnDef::primary_key("b")],
        };
        assert_eq!(
            create_table_sql(&PAIRS),
            "CREATE TABLE pairs (\n\ta INTEGER NOT NULL, \n\tb INTEGER NOT NULL, \n\tPRIMARY KEY (a, b)\n)"
        );
    }
}
