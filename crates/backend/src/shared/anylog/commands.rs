//! Fixed AnyLog commands issued by the backend itself

pub const GET_DATA_NODES: &str = "get data nodes where format=json";
pub const TEST_NETWORK: &str = "test network";
pub const GET_MONITORED_OPERATORS: &str = "get monitored operators";

pub fn data_nodes_of(dbms: &str) -> String {
    format!("{} and dbms=\"{}\"", GET_DATA_NODES, dbms.trim())
}

pub fn columns_of(dbms: &str, table: &str) -> String {
    format!(
        "get columns where dbms=\"{}\" and table=\"{}\" and format=json",
        dbms.trim(),
        table.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_text() {
        assert_eq!(
            data_nodes_of("opcua_demo"),
            "get data nodes where format=json and dbms=\"opcua_demo\""
        );
        assert_eq!(
            columns_of("opcua_demo", "t11"),
            "get columns where dbms=\"opcua_demo\" and table=\"t11\" and format=json"
        );
    }
}
