/// Name the service reports on `/api/health` and `/api/`.
#[derive(Clone, Debug)]
pub struct ServiceName(pub String);
