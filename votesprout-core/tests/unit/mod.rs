mod governance_client;
mod paymaster_client;
