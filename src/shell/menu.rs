use derive_more::Display;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum MainMenuItem {
    #[display("Admin Menu")]
    Admin,

    #[display("User Menu")]
    User,

    #[display("Exit")]
    Exit,
}

impl MainMenuItem {
    pub const ALL: [Self; 3] = [Self::Admin, Self::User, Self::Exit];
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum AdminMenuItem {
    #[display("Create New Consumer")]
    CreateConsumer,

    #[display("Add Appliances to Consumer")]
    AddAppliances,

    #[display("View Appliances of Consumer")]
    ViewAppliances,

    #[display("Remove Appliance from Consumer")]
    RemoveAppliance,

    #[display("View All Consumers")]
    ViewConsumers,

    #[display("Update and View Usage Logs")]
    UpdateUsage,

    #[display("Search for Consumer and Update Appliances")]
    ModifyAppliances,

    #[display("Back to Main Menu")]
    Back,
}

impl AdminMenuItem {
    pub const ALL: [Self; 8] = [
        Self::CreateConsumer,
        Self::AddAppliances,
        Self::ViewAppliances,
        Self::RemoveAppliance,
        Self::ViewConsumers,
        Self::UpdateUsage,
        Self::ModifyAppliances,
        Self::Back,
    ];
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum ModifyMenuItem {
    #[display("Change Appliance Power Consumption")]
    ChangeConsumption,

    #[display("Change Appliance Price")]
    ChangePrice,

    #[display("Rename Appliance")]
    Rename,

    #[display("Back to Admin Menu")]
    Back,
}

impl ModifyMenuItem {
    pub const ALL: [Self; 4] = [Self::ChangeConsumption, Self::ChangePrice, Self::Rename, Self::Back];
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum UserMenuItem {
    #[display("View Account Information")]
    ViewAccount,

    #[display("Back to Main Menu")]
    Back,
}

impl UserMenuItem {
    pub const ALL: [Self; 2] = [Self::ViewAccount, Self::Back];
}
