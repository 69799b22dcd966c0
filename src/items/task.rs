use crate::items::ews_item;

ews_item! {
    /// A to-do entry in a tasks folder.
    ///
    /// Date-time values are passed through verbatim as `xs:dateTime` strings
    /// (e.g. `2015-01-17T10:00:00Z`); the library does not interpret them.
    Task {
        element: "Task",
        delete_attributes: r#" AffectedTaskOccurrences="AllOccurrences""#,
    }
}

impl Task {
    pub fn get_start_date(&self) -> String {
        self.properties.get_value("StartDate")
    }

    pub fn set_start_date(&mut self, date_time: &str) {
        self.properties.set_or_update("StartDate", date_time);
    }

    pub fn get_due_date(&self) -> String {
        self.properties.get_value("DueDate")
    }

    pub fn set_due_date(&mut self, date_time: &str) {
        self.properties.set_or_update("DueDate", date_time);
    }

    pub fn get_complete_date(&self) -> String {
        self.properties.get_value("CompleteDate")
    }

    pub fn get_owner(&self) -> String {
        self.properties.get_value("Owner")
    }

    pub fn set_owner(&mut self, owner: &str) {
        self.properties.set_or_update("Owner", owner);
    }

    pub fn get_status(&self) -> String {
        self.properties.get_value("Status")
    }

    pub fn set_status(&mut self, status: &str) {
        self.properties.set_or_update("Status", status);
    }

    pub fn get_status_description(&self) -> String {
        self.properties.get_value("StatusDescription")
    }

    pub fn get_percent_complete(&self) -> String {
        self.properties.get_value("PercentComplete")
    }

    pub fn set_percent_complete(&mut self, percent: u8) {
        self.properties
            .set_or_update("PercentComplete", &percent.to_string());
    }

    pub fn get_actual_work(&self) -> String {
        self.properties.get_value("ActualWork")
    }

    pub fn set_actual_work(&mut self, minutes: u32) {
        self.properties
            .set_or_update("ActualWork", &minutes.to_string());
    }

    pub fn get_total_work(&self) -> String {
        self.properties.get_value("TotalWork")
    }

    pub fn set_total_work(&mut self, minutes: u32) {
        self.properties
            .set_or_update("TotalWork", &minutes.to_string());
    }

    pub fn get_mileage(&self) -> String {
        self.properties.get_value("Mileage")
    }

    pub fn set_mileage(&mut self, mileage: &str) {
        self.properties.set_or_update("Mileage", mileage);
    }

    pub fn get_billing_information(&self) -> String {
        self.properties.get_value("BillingInformation")
    }

    pub fn set_billing_information(&mut self, info: &str) {
        self.properties.set_or_update("BillingInformation", info);
    }

    pub fn get_change_count(&self) -> u32 {
        self.properties
            .get_value("ChangeCount")
            .parse()
            .unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.properties.get_value("IsComplete") == "true"
    }

    pub fn is_recurring(&self) -> bool {
        self.properties.get_value("IsRecurring") == "true"
    }

    pub fn get_delegation_state(&self) -> String {
        self.properties.get_value("DelegationState")
    }
}
