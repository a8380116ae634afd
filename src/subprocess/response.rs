/// Field separator of the line protocol.
pub const FIELD_SEPARATOR: &str = "\t";

/// Status token leading every client response.
#[derive(Debug, derive_more::Display, Clone, Eq, PartialEq)]
pub enum Status {
    /// Command succeeded.
    #[display("ok")]
    Ok,

    /// Command failed.
    #[display("err")]
    Err,

    /// Anything else the client wrote.
    #[display("{_0}")]
    Other(String),
}

impl From<&str> for Status {
    fn from(value: &str) -> Status {
        match value {
            "ok" => Status::Ok,
            "err" => Status::Err,
            other => Status::Other(other.into()),
        }
    }
}

/// One line read from the client.
#[derive(Debug, derive_more::Display, Clone, Eq, PartialEq)]
#[display("{line:?}")]
pub struct Response {
    /// Leading [Status] field.
    pub status: Status,

    /// Remaining tab-separated fields.
    pub fields: Vec<String>,

    /// The line as received, without the trailing newline.
    pub line: String,
}

impl Response {
    /// Splits a received `line` into its fields.
    pub fn parse<T: Into<String>>(line: T) -> Response {
        let line = line.into();
        let mut fields = line.split(FIELD_SEPARATOR).map(String::from);
        let status = fields.next().as_deref().unwrap_or_default().into();

        Response {
            status,
            fields: fields.collect(),
            line,
        }
    }

    /// First field after the status: the URL, email or echo token on `ok`, the detail on `err`.
    pub fn value(&self) -> Option<&str> {
        self.fields.first().map(String::as_str)
    }
}
