pub mod redfish;
