use crate::items::ews_item;

ews_item! {
    /// An address-book entry.
    Contact {
        element: "Contact",
    }
}

impl Contact {
    pub fn get_given_name(&self) -> String {
        self.properties.get_value("GivenName")
    }

    pub fn set_given_name(&mut self, name: &str) {
        self.properties.set_or_update("GivenName", name);
    }

    pub fn get_middle_name(&self) -> String {
        self.properties.get_value("MiddleName")
    }

    pub fn set_middle_name(&mut self, name: &str) {
        self.properties.set_or_update("MiddleName", name);
    }

    pub fn get_surname(&self) -> String {
        self.properties.get_value("Surname")
    }

    pub fn set_surname(&mut self, name: &str) {
        self.properties.set_or_update("Surname", name);
    }

    pub fn get_nickname(&self) -> String {
        self.properties.get_value("Nickname")
    }

    pub fn set_nickname(&mut self, name: &str) {
        self.properties.set_or_update("Nickname", name);
    }

    /// Computed by the server from the name parts; read-only.
    pub fn get_display_name(&self) -> String {
        self.properties.get_value("DisplayName")
    }

    pub fn get_job_title(&self) -> String {
        self.properties.get_value("JobTitle")
    }

    pub fn set_job_title(&mut self, title: &str) {
        self.properties.set_or_update("JobTitle", title);
    }

    pub fn get_company_name(&self) -> String {
        self.properties.get_value("CompanyName")
    }

    pub fn set_company_name(&mut self, name: &str) {
        self.properties.set_or_update("CompanyName", name);
    }

    pub fn get_department(&self) -> String {
        self.properties.get_value("Department")
    }

    pub fn set_department(&mut self, department: &str) {
        self.properties.set_or_update("Department", department);
    }

    pub fn get_office_location(&self) -> String {
        self.properties.get_value("OfficeLocation")
    }

    pub fn set_office_location(&mut self, location: &str) {
        self.properties.set_or_update("OfficeLocation", location);
    }

    pub fn get_assistant_name(&self) -> String {
        self.properties.get_value("AssistantName")
    }

    pub fn set_assistant_name(&mut self, name: &str) {
        self.properties.set_or_update("AssistantName", name);
    }

    pub fn get_business_homepage(&self) -> String {
        self.properties.get_value("BusinessHomePage")
    }

    pub fn set_business_homepage(&mut self, url: &str) {
        self.properties.set_or_update("BusinessHomePage", url);
    }

    pub fn get_spouse_name(&self) -> String {
        self.properties.get_value("SpouseName")
    }

    pub fn set_spouse_name(&mut self, name: &str) {
        self.properties.set_or_update("SpouseName", name);
    }

    pub fn get_profession(&self) -> String {
        self.properties.get_value("Profession")
    }

    pub fn set_profession(&mut self, profession: &str) {
        self.properties.set_or_update("Profession", profession);
    }

    /// Address from the keyed `EmailAddresses` dictionary, or the empty
    /// string when that slot is unset. `key` is one of `EmailAddress1`
    /// through `EmailAddress3`.
    pub fn get_email_address(&self, key: &str) -> String {
        let doc = self.properties.document();
        let Some(container) = self.properties.get_node("EmailAddresses") else {
            return String::new();
        };
        for &entry in doc.children(container) {
            if doc.attr(entry, "Key") == Some(key) {
                return doc.text(entry).to_string();
            }
        }
        String::new()
    }

    pub fn set_email_address(&mut self, key: &str, address: &str) {
        if let Some(container) = self.properties.get_node("EmailAddresses") {
            let doc = self.properties.document();
            let existing = doc
                .children(container)
                .iter()
                .copied()
                .find(|&entry| doc.attr(entry, "Key") == Some(key));
            if let Some(entry) = existing {
                self.properties.set_text(entry, address);
                return;
            }
            let entry = self.properties.append_element(Some(container), "Entry");
            self.properties.set_attribute(entry, "Key", key);
            self.properties.set_text(entry, address);
        } else {
            let container = self.properties.append_element(None, "EmailAddresses");
            let entry = self.properties.append_element(Some(container), "Entry");
            self.properties.set_attribute(entry, "Key", key);
            self.properties.set_text(entry, address);
        }
    }
}
