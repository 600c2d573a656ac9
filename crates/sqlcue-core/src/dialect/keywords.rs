//! Reserved keyword tables, initialized once per process

use once_cell::sync::Lazy;
use std::collections::HashSet;

pub(super) static EMPTY: Lazy<HashSet<&'static str>> = Lazy::new(HashSet::new);

pub(super) static HIVE_RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ALL", "ALTER", "AND", "ARRAY", "AS", "AUTHORIZATION", "BETWEEN", "BIGINT", "BINARY",
        "BOOLEAN", "BOTH", "BY", "CASE", "CAST", "CHAR", "COLUMN", "CONF", "CREATE", "CROSS",
        "CUBE", "CURRENT", "CURRENT_DATE", "CURRENT_TIMESTAMP", "CURSOR", "DATABASE", "DATE",
        "DECIMAL", "DELETE", "DESCRIBE", "DISTINCT", "DOUBLE", "DROP", "ELSE", "END", "EXCHANGE",
        "EXISTS", "EXTENDED", "EXTERNAL", "FALSE", "FETCH", "FLOAT", "FOLLOWING", "FOR", "FROM",
        "FULL", "FUNCTION", "GRANT", "GROUP", "GROUPING", "HAVING", "IF", "IMPORT", "IN", "INNER",
        "INSERT", "INT", "INTERSECT", "INTERVAL", "INTO", "IS", "JOIN", "LATERAL", "LEFT", "LESS",
        "LIKE", "LOCAL", "MACRO", "MAP", "MORE", "NONE", "NOT", "NULL", "OF", "ON", "OR", "ORDER",
        "OUT", "OUTER", "OVER", "PARTIALSCAN", "PARTITION", "PERCENT", "PRECEDING", "PRESERVE",
        "PROCEDURE", "RANGE", "READS", "REDUCE", "REGEXP", "REVOKE", "RIGHT", "RLIKE", "ROLLUP",
        "ROW", "ROWS", "SELECT", "SET", "SMALLINT", "TABLE", "TABLESAMPLE", "THEN", "TIMESTAMP",
        "TO", "TRANSFORM", "TRIGGER", "TRUE", "TRUNCATE", "UNBOUNDED", "UNION", "UNIQUEJOIN",
        "UPDATE", "USER", "USING", "VALUES", "VARCHAR", "WHEN", "WHERE", "WINDOW", "WITH",
    ]
    .into_iter()
    .collect()
});

pub(super) static HIVE_EXTRA_RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ASC", "CLUSTER", "DESC", "DISTRIBUTE", "FORMATTED", "FUNCTION", "INDEX", "INDEXES",
        "LIMIT", "SCHEMA", "SORT",
    ]
    .into_iter()
    .collect()
});

pub(super) static IMPALA_RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ADD", "AGGREGATE", "ALL", "ALTER", "AND", "API_VERSION", "AS", "ASC", "AVRO", "BETWEEN",
        "BIGINT", "BINARY", "BOOLEAN", "BY", "CACHED", "CASE", "CAST", "CHANGE", "CHAR", "CLASS",
        "CLOSE_FN", "COLUMN", "COLUMNS", "COMMENT", "COMPUTE", "CREATE", "CROSS", "DATA",
        "DATABASE", "DATABASES", "DATE", "DATETIME", "DECIMAL", "DELIMITED", "DESC", "DESCRIBE",
        "DISTINCT", "DIV", "DOUBLE", "DROP", "ELSE", "END", "ESCAPED", "EXISTS", "EXPLAIN",
        "EXTERNAL", "FALSE", "FIELDS", "FILEFORMAT", "FINALIZE_FN", "FIRST", "FLOAT", "FORMAT",
        "FORMATTED", "FROM", "FULL", "FUNCTION", "FUNCTIONS", "GROUP", "HAVING", "IF", "IN",
        "INCREMENTAL", "INIT_FN", "INNER", "INPATH", "INSERT", "INT", "INTEGER", "INTERMEDIATE",
        "INTERVAL", "INTO", "INVALIDATE", "IS", "JOIN", "LAST", "LEFT", "LIKE", "LIMIT", "LINES",
        "LOAD", "LOCATION", "MERGE_FN", "METADATA", "NOT", "NULL", "NULLS", "OFFSET", "ON", "OR",
        "ORDER", "OUTER", "OVERWRITE", "PARQUET", "PARQUETFILE", "PARTITION", "PARTITIONED",
        "PARTITIONS", "PREPARE_FN", "PRODUCED", "RCFILE", "REAL", "REFRESH", "REGEXP", "RENAME",
        "REPLACE", "RETURNS", "RIGHT", "RLIKE", "ROW", "SCHEMA", "SCHEMAS", "SELECT", "SEMI",
        "SEQUENCEFILE", "SERDEPROPERTIES", "SERIALIZE_FN", "SET", "SHOW", "SMALLINT", "STATS",
        "STORED", "STRAIGHT_JOIN", "STRING", "SYMBOL", "TABLE", "TABLES", "TBLPROPERTIES",
        "TERMINATED", "TEXTFILE", "THEN", "TIMESTAMP", "TINYINT", "TO", "TRUE", "UNCACHED",
        "UNION", "UPDATE_FN", "USE", "USING", "VALUES", "VIEW", "WHEN", "WHERE", "WITH",
    ]
    .into_iter()
    .collect()
});
